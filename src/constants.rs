use ethnum::U256;

lazy_static::lazy_static! {
    pub static ref Q96: U256 = U256::from(1u128) << 96;
    pub static ref Q128: U256 = U256::from(1u128) << 128;
    pub static ref Q160: U256 = U256::from(1u128) << 160;
    pub static ref U160_MAX: U256 = (U256::from(1u128) << 160) - U256::from(1u128);

    /// Smallest sqrt price, corresponding to MIN_TICK.
    pub static ref MIN_SQRT_PRICE: U256 = U256::from(4295128739u128);
    /// One above the largest sqrt price, corresponding to MAX_TICK.
    pub static ref MAX_SQRT_PRICE: U256 =
        U256::from_str_radix("1461446703485210103287273052203988822378723970342", 10).unwrap();
    pub static ref SQRT_PRICE_AT_TICK_0: U256 = U256::from(1u128) << 96;
}

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = 887272;

pub const MIN_TICK_SPACING: i32 = 1;
pub const MAX_TICK_SPACING: i32 = 32767;

/// 100% in hundredths of a bip.
pub const MAX_SWAP_FEE: u32 = 1_000_000;

/// Source defers protocol-fee deduction; see DESIGN.md.
pub const MAX_PROTOCOL_FEE: u16 = 1_000;

pub const DEFAULT_PROTOCOL_FEE: u16 = 0;
