//! One `thiserror` enum per component, matching the taxonomy in SPEC_FULL.md §7.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityMathError {
    #[error("liquidity delta would overflow u128")]
    Overflow,
    #[error("liquidity delta would underflow below zero")]
    Underflow,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullMathError {
    #[error("mul_div denominator is zero")]
    DenominatorZero,
    #[error("mul_div result overflows 256 bits")]
    Overflow,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqrtPriceMathError {
    #[error("sqrt price would overflow")]
    PriceOverflow,
    #[error("not enough liquidity to support requested amount")]
    NotEnoughLiquidity,
    #[error("invalid price or liquidity input (zero)")]
    InvalidPriceOrLiquidity,
    #[error("invalid fee for price computation")]
    InvalidFee,
    #[error("amount exceeds 2^160 - 1")]
    AmountOverflow,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountDeltaError {
    #[error("invalid sqrt price: must be nonzero")]
    InvalidPrice,
    #[error("amount delta computation overflowed")]
    Overflow,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMathError {
    #[error("tick {0} outside [MIN_TICK, MAX_TICK]")]
    InvalidTick(i32),
    #[error("sqrt price outside [MIN_SQRT_PRICE, MAX_SQRT_PRICE)")]
    InvalidSqrtPrice,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickBitmapError {
    #[error("tick {0} is not a multiple of tick spacing {1}")]
    TickMisaligned(i32, i32),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTickError {
    #[error("tick's liquidity_gross would exceed max_liquidity_per_tick")]
    TickLiquidityOverflow,
    #[error(transparent)]
    LiquidityMath(#[from] LiquidityMathError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePositionError {
    #[error("position not found")]
    PositionNotFound,
    #[error("cannot update an empty position with a zero liquidity delta")]
    CannotUpdateEmptyPosition,
    #[error(transparent)]
    LiquidityMath(#[from] LiquidityMathError),
    #[error(transparent)]
    FullMath(#[from] FullMathError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeSwapStepError {
    #[error(transparent)]
    FullMath(#[from] FullMathError),
    #[error(transparent)]
    SqrtPriceMath(#[from] SqrtPriceMathError),
    #[error(transparent)]
    AmountDelta(#[from] AmountDeltaError),
    #[error("swap fee {0} exceeds MAX_SWAP_FEE")]
    InvalidSwapFee(u32),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceDeltaError {
    #[error("balance delta addition overflowed")]
    Overflow,
    #[error("balance delta subtraction underflowed")]
    Underflow,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolIdError {
    #[error("token0 must be strictly less than token1")]
    InvalidTokenOrder,
    #[error("tick spacing {0} exceeds MAX_TICK_SPACING")]
    TickSpacingTooLarge(i32),
    #[error("tick spacing {0} is below MIN_TICK_SPACING")]
    TickSpacingTooSmall(i32),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializeError {
    #[error("pool is already initialized")]
    PoolAlreadyInitialized,
    #[error(transparent)]
    TickMath(#[from] TickMathError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetFeeError {
    #[error("pool is not initialized")]
    PoolNotInitialized,
    #[error("lp fee {0} exceeds MAX_SWAP_FEE")]
    InvalidLpFee(u32),
    #[error("protocol fee {0} exceeds MAX_PROTOCOL_FEE")]
    InvalidProtocolFee(u16),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyLiquidityError {
    #[error("pool is not initialized")]
    PoolNotInitialized,
    #[error("tick_lower must be strictly less than tick_upper")]
    TicksMisordered,
    #[error("tick_lower {0} is out of bounds")]
    TickLowerOutOfBounds(i32),
    #[error("tick_upper {0} is out of bounds")]
    TickUpperOutOfBounds(i32),
    #[error(transparent)]
    TickBitmap(#[from] TickBitmapError),
    #[error(transparent)]
    UpdateTick(#[from] UpdateTickError),
    #[error(transparent)]
    UpdatePosition(#[from] UpdatePositionError),
    #[error(transparent)]
    AmountDelta(#[from] AmountDeltaError),
    #[error(transparent)]
    LiquidityMath(#[from] LiquidityMathError),
    #[error(transparent)]
    TickMath(#[from] TickMathError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    #[error("pool is not initialized")]
    PoolNotInitialized,
    #[error("pool has no liquidity")]
    IlliquidPool,
    #[error("price limit already exceeded at the current pool price")]
    PriceLimitAlreadyExceeded,
    #[error("price limit is out of bounds")]
    PriceLimitOutOfBounds,
    #[error("exact-output swap requires a nonzero fee denominator")]
    InvalidForExactOutput,
    #[error(transparent)]
    ComputeSwapStep(#[from] ComputeSwapStepError),
    #[error(transparent)]
    TickBitmap(#[from] TickBitmapError),
    #[error(transparent)]
    UpdateTick(#[from] UpdateTickError),
    #[error(transparent)]
    LiquidityMath(#[from] LiquidityMathError),
    #[error(transparent)]
    TickMath(#[from] TickMathError),
    #[error(transparent)]
    FullMath(#[from] FullMathError),
    #[error(transparent)]
    BalanceDelta(#[from] BalanceDeltaError),
}
