//! Next-√price computation from an amount of currency0 or currency1 (C3).

use ethnum::U256;

use super::full_math::{div_rounding_up, mul_div_rounding_up};
use crate::constants::{Q160, Q96, U160_MAX};
use crate::errors::SqrtPriceMathError;

/// Next √P given a delta of currency0, always rounded up.
pub fn get_next_sqrt_price_from_amount0_rounding_up(
    sqrt_px96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, SqrtPriceMathError> {
    if amount == 0 {
        return Ok(sqrt_px96);
    }

    let numerator1: U256 = U256::from(liquidity) << 96;

    if add {
        let product = amount.wrapping_mul(sqrt_px96);
        if product / amount == sqrt_px96 {
            let denominator = numerator1.wrapping_add(product);
            if denominator >= numerator1 {
                let result = mul_div_rounding_up(numerator1, sqrt_px96, denominator)
                    .map_err(|_| SqrtPriceMathError::PriceOverflow)?;
                if result > *U160_MAX {
                    return Err(SqrtPriceMathError::PriceOverflow);
                }
                return Ok(result);
            }
        }
        let result = div_rounding_up(numerator1, (numerator1 / sqrt_px96).wrapping_add(amount));
        if result > *U160_MAX {
            return Err(SqrtPriceMathError::PriceOverflow);
        }
        Ok(result)
    } else {
        let product = amount.wrapping_mul(sqrt_px96);
        if product / amount != sqrt_px96 || numerator1 <= product {
            return Err(SqrtPriceMathError::PriceOverflow);
        }
        let denominator = numerator1.wrapping_sub(product);
        let result = mul_div_rounding_up(numerator1, sqrt_px96, denominator)
            .map_err(|_| SqrtPriceMathError::PriceOverflow)?;
        if result > *U160_MAX {
            return Err(SqrtPriceMathError::PriceOverflow);
        }
        Ok(result)
    }
}

/// Next √P given a delta of currency1, always rounded down.
///
/// The amount-overflow check is performed unconditionally before branching
/// on `add` (see SPEC_FULL.md §9 — the source only checked it on the
/// subtraction path).
pub fn get_next_sqrt_price_from_amount1_rounding_down(
    sqrt_px96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, SqrtPriceMathError> {
    if add {
        let quotient = if amount <= *Q160 - 1 {
            (amount << 96) / U256::from(liquidity)
        } else {
            mul_div_rounding_up(amount, *Q96, U256::from(liquidity))
                .map_err(|_| SqrtPriceMathError::PriceOverflow)?
        };

        let result = sqrt_px96.wrapping_add(quotient);
        if result > *U160_MAX {
            return Err(SqrtPriceMathError::PriceOverflow);
        }
        Ok(result)
    } else {
        let quotient = if amount <= *Q160 - 1 {
            div_rounding_up(amount << 96, U256::from(liquidity))
        } else {
            mul_div_rounding_up(amount, *Q96, U256::from(liquidity))
                .map_err(|_| SqrtPriceMathError::PriceOverflow)?
        };
        if sqrt_px96 <= quotient {
            return Err(SqrtPriceMathError::NotEnoughLiquidity);
        }
        let result = sqrt_px96.wrapping_sub(quotient);
        if result > *U160_MAX {
            return Err(SqrtPriceMathError::PriceOverflow);
        }
        Ok(result)
    }
}

/// Dispatches to the amount0/amount1 formula for an exact-input step.
pub fn get_next_sqrt_price_from_input(
    sqrt_px96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, SqrtPriceMathError> {
    if sqrt_px96 == 0 || liquidity == 0 {
        return Err(SqrtPriceMathError::InvalidPriceOrLiquidity);
    }
    if zero_for_one {
        get_next_sqrt_price_from_amount0_rounding_up(sqrt_px96, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount1_rounding_down(sqrt_px96, liquidity, amount_in, true)
    }
}

/// Dispatches to the amount0/amount1 formula for an exact-output step.
pub fn get_next_sqrt_price_from_output(
    sqrt_px96: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, SqrtPriceMathError> {
    if sqrt_px96 == 0 || liquidity == 0 {
        return Err(SqrtPriceMathError::InvalidPriceOrLiquidity);
    }
    if zero_for_one {
        get_next_sqrt_price_from_amount1_rounding_down(sqrt_px96, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount0_rounding_up(sqrt_px96, liquidity, amount_out, false)
    }
}
