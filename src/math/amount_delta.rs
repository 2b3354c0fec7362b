//! Token-amount deltas between two √prices at a given liquidity (C3).

use ethnum::{I256, U256};

use super::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};
use crate::constants::Q96;
use crate::errors::AmountDeltaError;

const FIXED_POINT_96_RESOLUTION: u8 = 96;

/// |a - b| over the full 256-bit range, without relying on a prior ordering.
pub fn abs_diff(a: U256, b: U256) -> U256 {
    let diff = a.wrapping_sub(b);
    let mask = if diff >> 255 != U256::ZERO { U256::MAX } else { U256::ZERO };
    mask ^ diff.wrapping_add(mask)
}

/// Amount of currency0 to cover a position of size `liquidity` between the
/// two prices: `liquidity * (sqrt_upper - sqrt_lower) / (sqrt_upper * sqrt_lower)`.
pub fn get_amount_0_delta(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, AmountDeltaError> {
    let (sqrt_lower, sqrt_upper) = if sqrt_price_a_x96 > sqrt_price_b_x96 {
        (sqrt_price_b_x96, sqrt_price_a_x96)
    } else {
        (sqrt_price_a_x96, sqrt_price_b_x96)
    };

    if sqrt_lower == U256::ZERO {
        return Err(AmountDeltaError::InvalidPrice);
    }

    let numerator1 = U256::from(liquidity) << FIXED_POINT_96_RESOLUTION;
    let numerator2 = sqrt_upper.wrapping_sub(sqrt_lower);

    if round_up {
        let result = mul_div_rounding_up(numerator1, numerator2, sqrt_upper)
            .map_err(|_| AmountDeltaError::Overflow)?;
        Ok(div_rounding_up(result, sqrt_lower))
    } else {
        let result =
            mul_div(numerator1, numerator2, sqrt_upper).map_err(|_| AmountDeltaError::Overflow)?;
        Ok(result / sqrt_lower)
    }
}

/// Signed amount0 delta for a signed liquidity change.
pub fn get_amount_0_delta_signed(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: i128,
) -> Result<I256, AmountDeltaError> {
    if liquidity < 0 {
        let abs_liquidity = liquidity
            .checked_neg()
            .ok_or(AmountDeltaError::Overflow)?
            .try_into()
            .map_err(|_| AmountDeltaError::Overflow)?;
        I256::try_from(get_amount_0_delta(sqrt_price_a_x96, sqrt_price_b_x96, abs_liquidity, false)?)
            .map_err(|_| AmountDeltaError::Overflow)
    } else {
        let abs_liquidity = u128::try_from(liquidity).map_err(|_| AmountDeltaError::Overflow)?;
        I256::try_from(get_amount_0_delta(sqrt_price_a_x96, sqrt_price_b_x96, abs_liquidity, true)?)
            .map(|amount| -amount)
            .map_err(|_| AmountDeltaError::Overflow)
    }
}

/// Amount of currency1 to cover a position of size `liquidity` between the
/// two prices: `liquidity * (sqrt_upper - sqrt_lower)`.
pub fn get_amount_1_delta(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, AmountDeltaError> {
    let numerator = abs_diff(sqrt_price_a_x96, sqrt_price_b_x96);
    let denominator = *Q96;
    let liquidity_u256 = U256::from(liquidity);

    let amount1 =
        mul_div(liquidity_u256, numerator, denominator).map_err(|_| AmountDeltaError::Overflow)?;

    if round_up {
        let remainder = (liquidity_u256 * numerator) % denominator;
        if remainder > U256::ZERO {
            amount1.checked_add(U256::ONE).ok_or(AmountDeltaError::Overflow)
        } else {
            Ok(amount1)
        }
    } else {
        Ok(amount1)
    }
}

/// Signed amount1 delta for a signed liquidity change.
pub fn get_amount_1_delta_signed(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: i128,
) -> Result<I256, AmountDeltaError> {
    if liquidity < 0 {
        let abs_liquidity = liquidity
            .checked_neg()
            .ok_or(AmountDeltaError::Overflow)?
            .try_into()
            .map_err(|_| AmountDeltaError::Overflow)?;
        I256::try_from(get_amount_1_delta(sqrt_price_a_x96, sqrt_price_b_x96, abs_liquidity, false)?)
            .map_err(|_| AmountDeltaError::Overflow)
    } else {
        let abs_liquidity = u128::try_from(liquidity).map_err(|_| AmountDeltaError::Overflow)?;
        I256::try_from(get_amount_1_delta(sqrt_price_a_x96, sqrt_price_b_x96, abs_liquidity, true)?)
            .map(|amount| -amount)
            .map_err(|_| AmountDeltaError::Overflow)
    }
}
