//! Fixed-point and integer math kernels shared by the tick, position, and
//! pool modules.

pub mod amount_delta;
pub mod bit_math;
pub mod fee_math;
pub mod full_math;
pub mod liquidity_math;
pub mod safe_cast;
pub mod signed;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;
