//! Pool state machine (C9): integrates the tick table, tick bitmap, and
//! position ledger into `initialize`, `modify_liquidity`, `swap`, and the
//! fee-governance setters.

pub mod swap;
pub mod types;


use ethnum::U256;
use log::debug;

use crate::balance_delta::BalanceDelta;
use crate::constants::{MAX_PROTOCOL_FEE, MAX_SWAP_FEE, MAX_TICK, MIN_TICK};
use crate::errors::{InitializeError, ModifyLiquidityError, SetFeeError};
use crate::math::{amount_delta, liquidity_math, tick_math};
use crate::position::{self, types::PositionKey};
use crate::tick::{self, types::TickInfo};
use crate::tick_bitmap;
use types::{Pool, PoolConfig};

/// Initializes an empty `Pool` at `sqrt_price_x96`, seeding the tick table
/// with an entry at the resulting tick. Fails if the pool is already
/// initialized (`sqrt_price_x96 != 0`).
pub fn initialize(pool: &mut Pool, config: PoolConfig, sqrt_price_x96: U256) -> Result<i32, InitializeError> {
    if pool.is_initialized() {
        return Err(InitializeError::PoolAlreadyInitialized);
    }

    let tick = tick_math::get_tick_at_sqrt_ratio(sqrt_price_x96)?;

    pool.sqrt_price_x96 = sqrt_price_x96;
    pool.tick = tick;
    pool.lp_fee = config.initial_lp_fee;
    pool.protocol_fee = 0;
    pool.tick_spacing = config.tick_spacing;
    pool.max_liquidity_per_tick = tick::tick_spacing_to_max_liquidity_per_tick(config.tick_spacing);
    pool.fee_growth_global_0_x128 = U256::ZERO;
    pool.fee_growth_global_1_x128 = U256::ZERO;
    pool.ticks.insert(tick, TickInfo::default());

    debug!("pool initialized at tick {tick}, sqrt_price_x96 {sqrt_price_x96}");
    Ok(tick)
}

pub fn set_protocol_fee(pool: &mut Pool, protocol_fee: u16) -> Result<(), SetFeeError> {
    if !pool.is_initialized() {
        return Err(SetFeeError::PoolNotInitialized);
    }
    if protocol_fee > MAX_PROTOCOL_FEE {
        return Err(SetFeeError::InvalidProtocolFee(protocol_fee));
    }
    pool.protocol_fee = protocol_fee;
    Ok(())
}

pub fn set_lp_fee(pool: &mut Pool, lp_fee: u32) -> Result<(), SetFeeError> {
    if !pool.is_initialized() {
        return Err(SetFeeError::PoolNotInitialized);
    }
    if lp_fee > MAX_SWAP_FEE {
        return Err(SetFeeError::InvalidLpFee(lp_fee));
    }
    pool.lp_fee = lp_fee;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifyLiquidityParams {
    pub owner: [u8; 32],
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity_delta: i128,
    pub salt: [u8; 32],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifyLiquiditySuccess {
    pub delta: BalanceDelta,
    pub fees_owed_0: U256,
    pub fees_owed_1: U256,
}

/// Adds or removes liquidity over `[tick_lower, tick_upper]` for one
/// position, returning the token amounts owed and any accrued fees.
pub fn modify_liquidity(
    pool: &mut Pool,
    params: ModifyLiquidityParams,
) -> Result<ModifyLiquiditySuccess, ModifyLiquidityError> {
    if !pool.is_initialized() {
        return Err(ModifyLiquidityError::PoolNotInitialized);
    }
    if params.tick_lower >= params.tick_upper {
        return Err(ModifyLiquidityError::TicksMisordered);
    }
    if params.tick_lower < MIN_TICK || params.tick_lower > MAX_TICK {
        return Err(ModifyLiquidityError::TickLowerOutOfBounds(params.tick_lower));
    }
    if params.tick_upper < MIN_TICK || params.tick_upper > MAX_TICK {
        return Err(ModifyLiquidityError::TickUpperOutOfBounds(params.tick_upper));
    }

    let delta = params.liquidity_delta;

    if delta != 0 {
        let lower_outcome = tick::update_tick(
            &mut pool.ticks,
            params.tick_lower,
            pool.tick,
            delta,
            pool.fee_growth_global_0_x128,
            pool.fee_growth_global_1_x128,
            false,
            pool.max_liquidity_per_tick,
        )?;
        let upper_outcome = tick::update_tick(
            &mut pool.ticks,
            params.tick_upper,
            pool.tick,
            delta,
            pool.fee_growth_global_0_x128,
            pool.fee_growth_global_1_x128,
            true,
            pool.max_liquidity_per_tick,
        )?;

        if lower_outcome.flipped {
            tick_bitmap::flip_tick(&mut pool.bitmap, params.tick_lower, pool.tick_spacing)?;
        }
        if upper_outcome.flipped {
            tick_bitmap::flip_tick(&mut pool.bitmap, params.tick_upper, pool.tick_spacing)?;
        }
    }

    let lower_info = pool.ticks.get(&params.tick_lower).copied().unwrap_or_default();
    let upper_info = pool.ticks.get(&params.tick_upper).copied().unwrap_or_default();

    let (fee_growth_inside_0, fee_growth_inside_1) = tick::get_fee_growth_inside(
        params.tick_lower,
        params.tick_upper,
        &lower_info,
        &upper_info,
        pool.tick,
        pool.fee_growth_global_0_x128,
        pool.fee_growth_global_1_x128,
    );

    let position_key = PositionKey {
        owner: params.owner,
        tick_lower: params.tick_lower,
        tick_upper: params.tick_upper,
        salt: params.salt,
    };
    let (fees_owed_0, fees_owed_1) = position::update_position(
        &mut pool.positions,
        &position_key,
        delta,
        fee_growth_inside_0,
        fee_growth_inside_1,
    )?;

    let sqrt_price_lower = tick_math::get_sqrt_ratio_at_tick(params.tick_lower)?;
    let sqrt_price_upper = tick_math::get_sqrt_ratio_at_tick(params.tick_upper)?;

    let (amount0, amount1) = if pool.tick < params.tick_lower {
        (amount_delta::get_amount_0_delta_signed(sqrt_price_lower, sqrt_price_upper, delta)?, ethnum::I256::ZERO)
    } else if pool.tick < params.tick_upper {
        let amount0 = amount_delta::get_amount_0_delta_signed(pool.sqrt_price_x96, sqrt_price_upper, delta)?;
        let amount1 = amount_delta::get_amount_1_delta_signed(sqrt_price_lower, pool.sqrt_price_x96, delta)?;
        pool.liquidity = liquidity_math::add_delta(pool.liquidity, delta)?;
        (amount0, amount1)
    } else {
        (ethnum::I256::ZERO, amount_delta::get_amount_1_delta_signed(sqrt_price_lower, sqrt_price_upper, delta)?)
    };

    debug!(
        "modify_liquidity tick_lower={} tick_upper={} delta={} amount0={} amount1={}",
        params.tick_lower, params.tick_upper, delta, amount0, amount1
    );

    Ok(ModifyLiquiditySuccess {
        delta: BalanceDelta::new(amount0, amount1),
        fees_owed_0,
        fees_owed_1,
    })
}
