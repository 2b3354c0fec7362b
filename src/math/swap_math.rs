//! Single swap-step computation (C8): advances the price by at most the
//! distance to `sqrt_price_target_x96`, consuming part of `amount_remaining`
//! and charging the LP fee out of the input side.
//!
//! `amount_remaining` follows the source's own sign convention rather than a
//! separate boolean: negative means "exact input, this much remains to
//! spend", positive means "exact output, this much remains to receive".
//! `compute_swap_step` itself is pure and side-effect free; the pool state
//! machine (`crate::pool`) is the only caller.

use ethnum::{I256, U256};

use super::amount_delta::{get_amount_0_delta, get_amount_1_delta};
use super::full_math::{mul_div, mul_div_rounding_up};
use crate::constants::{MAX_SWAP_FEE, U160_MAX};
use crate::errors::ComputeSwapStepError;

/// Picks between the price at the next initialized tick and the caller's
/// price limit, clamping in the direction that can never cross the limit.
pub fn get_sqrt_price_target(
    zero_for_one: bool,
    sqrt_price_next_x96: U256,
    sqrt_price_limit_x96: U256,
) -> Result<U256, ComputeSwapStepError> {
    if sqrt_price_next_x96 == 0
        || sqrt_price_limit_x96 == 0
        || sqrt_price_next_x96 > *U160_MAX
        || sqrt_price_limit_x96 > *U160_MAX
    {
        return Err(ComputeSwapStepError::SqrtPriceMath(
            crate::errors::SqrtPriceMathError::InvalidPriceOrLiquidity,
        ));
    }

    Ok(if zero_for_one {
        sqrt_price_next_x96.max(sqrt_price_limit_x96)
    } else {
        sqrt_price_next_x96.min(sqrt_price_limit_x96)
    })
}

pub fn compute_swap_step(
    sqrt_price_current_x96: U256,
    sqrt_price_target_x96: U256,
    liquidity: u128,
    amount_remaining: I256,
    fee_pips: u32,
) -> Result<(U256, U256, U256, U256), ComputeSwapStepError> {
    if sqrt_price_current_x96 == U256::ZERO || liquidity == 0 {
        return Err(crate::errors::SqrtPriceMathError::InvalidPriceOrLiquidity.into());
    }
    if fee_pips > MAX_SWAP_FEE {
        return Err(ComputeSwapStepError::InvalidSwapFee(fee_pips));
    }

    let zero_for_one = sqrt_price_current_x96 >= sqrt_price_target_x96;
    let exact_in = amount_remaining < I256::ZERO;

    if exact_in {
        let amount_remaining_abs = U256::from((-amount_remaining).as_u256());
        let amount_remaining_less_fee = mul_div(
            amount_remaining_abs,
            U256::from(MAX_SWAP_FEE - fee_pips),
            U256::from(MAX_SWAP_FEE),
        )?;

        let amount_in = if zero_for_one {
            get_amount_0_delta(sqrt_price_target_x96, sqrt_price_current_x96, liquidity, true)?
        } else {
            get_amount_1_delta(sqrt_price_current_x96, sqrt_price_target_x96, liquidity, true)?
        };

        if amount_remaining_less_fee >= amount_in {
            let sqrt_price_next_x96 = sqrt_price_target_x96;
            let fee_amount = if fee_pips == MAX_SWAP_FEE {
                amount_in
            } else {
                mul_div_rounding_up(amount_in, U256::from(fee_pips), U256::from(MAX_SWAP_FEE - fee_pips))?
            };
            let amount_out = if zero_for_one {
                get_amount_1_delta(sqrt_price_next_x96, sqrt_price_current_x96, liquidity, false)?
            } else {
                get_amount_0_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity, false)?
            };
            Ok((sqrt_price_next_x96, amount_in, amount_out, fee_amount))
        } else {
            let amount_in = amount_remaining_less_fee;
            let sqrt_price_next_x96 = super::sqrt_price_math::get_next_sqrt_price_from_input(
                sqrt_price_current_x96,
                liquidity,
                amount_in,
                zero_for_one,
            )?;
            let fee_amount = amount_remaining_abs - amount_in;
            let amount_out = if zero_for_one {
                get_amount_1_delta(sqrt_price_next_x96, sqrt_price_current_x96, liquidity, false)?
            } else {
                get_amount_0_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity, false)?
            };
            Ok((sqrt_price_next_x96, amount_in, amount_out, fee_amount))
        }
    } else {
        let amount_out = if zero_for_one {
            get_amount_1_delta(sqrt_price_target_x96, sqrt_price_current_x96, liquidity, false)?
        } else {
            get_amount_0_delta(sqrt_price_current_x96, sqrt_price_target_x96, liquidity, false)?
        };

        let amount_remaining_u256 = amount_remaining.as_u256();
        let (sqrt_price_next_x96, amount_out) = if amount_remaining_u256 >= amount_out {
            (sqrt_price_target_x96, amount_out)
        } else {
            let capped_amount_out = amount_remaining_u256;
            let next_price = super::sqrt_price_math::get_next_sqrt_price_from_output(
                sqrt_price_current_x96,
                liquidity,
                capped_amount_out,
                zero_for_one,
            )?;
            (next_price, capped_amount_out)
        };

        let amount_in = if zero_for_one {
            get_amount_0_delta(sqrt_price_next_x96, sqrt_price_current_x96, liquidity, true)?
        } else {
            get_amount_1_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity, true)?
        };

        if fee_pips == MAX_SWAP_FEE {
            return Err(ComputeSwapStepError::InvalidSwapFee(fee_pips));
        }
        let fee_amount =
            mul_div_rounding_up(amount_in, U256::from(fee_pips), U256::from(MAX_SWAP_FEE - fee_pips))?;

        Ok((sqrt_price_next_x96, amount_in, amount_out, fee_amount))
    }
}
