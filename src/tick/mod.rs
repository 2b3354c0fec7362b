//! Per-tick liquidity and fee-growth bookkeeping (C6).

pub mod types;

use std::collections::HashMap;

use ethnum::U256;

use crate::constants::{MAX_TICK, MIN_TICK};
use crate::errors::UpdateTickError;
use crate::math::liquidity_math;
use types::TickInfo;

/// All initialized ticks for one pool, keyed by raw tick index.
pub type TickTable = HashMap<i32, TickInfo>;

/// Upper bound on `liquidity_gross` at any single tick, derived from tick
/// spacing so that the sum over all ticks can never exceed `u128::MAX`.
pub fn tick_spacing_to_max_liquidity_per_tick(tick_spacing: i32) -> u128 {
    let min_tick = (MIN_TICK / tick_spacing) * tick_spacing;
    let max_tick = (MAX_TICK / tick_spacing) * tick_spacing;
    let num_ticks = ((max_tick - min_tick) / tick_spacing) as u32 + 1;
    u128::MAX / num_ticks as u128
}

/// Fee growth accrued inside `[tick_lower, tick_upper]` as of now, used to
/// settle a position's owed fees since its last touch.
pub fn get_fee_growth_inside(
    tick_lower: i32,
    tick_upper: i32,
    lower_info: &TickInfo,
    upper_info: &TickInfo,
    tick_current: i32,
    fee_growth_global_0_x128: U256,
    fee_growth_global_1_x128: U256,
) -> (U256, U256) {
    let (fee_growth_below_0, fee_growth_below_1) = if tick_current >= tick_lower {
        (lower_info.fee_growth_outside_0_x128, lower_info.fee_growth_outside_1_x128)
    } else {
        (
            fee_growth_global_0_x128.wrapping_sub(lower_info.fee_growth_outside_0_x128),
            fee_growth_global_1_x128.wrapping_sub(lower_info.fee_growth_outside_1_x128),
        )
    };

    let (fee_growth_above_0, fee_growth_above_1) = if tick_current < tick_upper {
        (upper_info.fee_growth_outside_0_x128, upper_info.fee_growth_outside_1_x128)
    } else {
        (
            fee_growth_global_0_x128.wrapping_sub(upper_info.fee_growth_outside_0_x128),
            fee_growth_global_1_x128.wrapping_sub(upper_info.fee_growth_outside_1_x128),
        )
    };

    (
        fee_growth_global_0_x128
            .wrapping_sub(fee_growth_below_0)
            .wrapping_sub(fee_growth_above_0),
        fee_growth_global_1_x128
            .wrapping_sub(fee_growth_below_1)
            .wrapping_sub(fee_growth_above_1),
    )
}

#[derive(Debug, PartialEq)]
pub struct UpdateTickOutcome {
    pub flipped: bool,
    pub liquidity_gross_after: u128,
}

/// Applies a liquidity delta to the tick at `tick`, initializing its
/// fee-growth-outside snapshot (by the convention that all growth prior to
/// initialization happened below the tick) the first time it is touched.
pub fn update_tick(
    table: &mut TickTable,
    tick: i32,
    tick_current: i32,
    liquidity_delta: i128,
    fee_growth_global_0_x128: U256,
    fee_growth_global_1_x128: U256,
    upper: bool,
    max_liquidity_per_tick: u128,
) -> Result<UpdateTickOutcome, UpdateTickError> {
    let mut info = table.get(&tick).copied().unwrap_or_default();

    let liquidity_gross_before = info.liquidity_gross;
    let liquidity_gross_after = liquidity_math::add_delta(liquidity_gross_before, liquidity_delta)?;

    if liquidity_gross_after > max_liquidity_per_tick {
        return Err(UpdateTickError::TickLiquidityOverflow);
    }

    let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

    if liquidity_gross_before == 0 && tick <= tick_current {
        info.fee_growth_outside_0_x128 = fee_growth_global_0_x128;
        info.fee_growth_outside_1_x128 = fee_growth_global_1_x128;
    }

    info.liquidity_gross = liquidity_gross_after;
    info.liquidity_net = if upper {
        info.liquidity_net.wrapping_sub(liquidity_delta)
    } else {
        info.liquidity_net.wrapping_add(liquidity_delta)
    };

    if liquidity_gross_after == 0 {
        table.remove(&tick);
    } else {
        table.insert(tick, info);
    }

    Ok(UpdateTickOutcome { flipped, liquidity_gross_after })
}

/// Flips a tick's fee-growth-outside snapshot as price crosses it, and
/// returns the net liquidity change to apply to the pool's active liquidity.
pub fn cross_tick(
    table: &mut TickTable,
    tick: i32,
    fee_growth_global_0_x128: U256,
    fee_growth_global_1_x128: U256,
) -> i128 {
    let info = table.get_mut(&tick).expect("crossing an uninitialized tick");
    info.fee_growth_outside_0_x128 = fee_growth_global_0_x128.wrapping_sub(info.fee_growth_outside_0_x128);
    info.fee_growth_outside_1_x128 = fee_growth_global_1_x128.wrapping_sub(info.fee_growth_outside_1_x128);
    info.liquidity_net
}

pub fn clear_tick(table: &mut TickTable, tick: i32) {
    table.remove(&tick);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_table() -> TickTable {
        TickTable::new()
    }

    #[test]
    fn max_liquidity_per_tick_scales_with_spacing() {
        let coarse = tick_spacing_to_max_liquidity_per_tick(200);
        let fine = tick_spacing_to_max_liquidity_per_tick(1);
        assert!(coarse > fine);
    }

    #[test]
    fn update_tick_initializes_fee_growth_outside_below_current() {
        let mut table = fresh_table();
        let outcome = update_tick(&mut table, -10, 0, 100, U256::from(5u32), U256::from(7u32), false, u128::MAX).unwrap();
        assert!(outcome.flipped);
        let info = table.get(&-10).unwrap();
        assert_eq!(info.fee_growth_outside_0_x128, U256::from(5u32));
        assert_eq!(info.fee_growth_outside_1_x128, U256::from(7u32));
    }

    #[test]
    fn update_tick_does_not_initialize_fee_growth_outside_above_current() {
        let mut table = fresh_table();
        update_tick(&mut table, 10, 0, 100, U256::from(5u32), U256::from(7u32), false, u128::MAX).unwrap();
        let info = table.get(&10).unwrap();
        assert_eq!(info.fee_growth_outside_0_x128, U256::ZERO);
        assert_eq!(info.fee_growth_outside_1_x128, U256::ZERO);
    }

    #[test]
    fn update_tick_flips_only_on_zero_crossing() {
        let mut table = fresh_table();
        let first = update_tick(&mut table, 0, 0, 100, U256::ZERO, U256::ZERO, false, u128::MAX).unwrap();
        assert!(first.flipped);
        let second = update_tick(&mut table, 0, 0, 50, U256::ZERO, U256::ZERO, false, u128::MAX).unwrap();
        assert!(!second.flipped);
    }

    #[test]
    fn update_tick_removing_all_liquidity_clears_the_tick() {
        let mut table = fresh_table();
        update_tick(&mut table, 0, 0, 100, U256::ZERO, U256::ZERO, false, u128::MAX).unwrap();
        update_tick(&mut table, 0, 0, -100, U256::ZERO, U256::ZERO, false, u128::MAX).unwrap();
        assert!(!table.contains_key(&0));
    }

    #[test]
    fn update_tick_rejects_exceeding_max_liquidity_per_tick() {
        let mut table = fresh_table();
        let result = update_tick(&mut table, 0, 0, 100, U256::ZERO, U256::ZERO, false, 50);
        assert_eq!(result, Err(UpdateTickError::TickLiquidityOverflow));
    }

    #[test]
    fn update_tick_upper_subtracts_from_liquidity_net() {
        let mut table = fresh_table();
        update_tick(&mut table, 0, 0, 100, U256::ZERO, U256::ZERO, true, u128::MAX).unwrap();
        assert_eq!(table.get(&0).unwrap().liquidity_net, -100);
    }

    #[test]
    fn cross_tick_flips_fee_growth_outside_with_wrapping_subtraction() {
        let mut table = fresh_table();
        update_tick(&mut table, 0, 5, 100, U256::from(3u32), U256::from(4u32), false, u128::MAX).unwrap();
        let net = cross_tick(&mut table, 0, U256::from(10u32), U256::from(10u32));
        assert_eq!(net, 100);
        let info = table.get(&0).unwrap();
        assert_eq!(info.fee_growth_outside_0_x128, U256::from(10u32).wrapping_sub(U256::ZERO));
        assert_eq!(info.fee_growth_outside_1_x128, U256::from(10u32).wrapping_sub(U256::ZERO));
    }

    #[test]
    fn cross_tick_wraps_rather_than_panics_when_outside_exceeds_global() {
        let mut table = fresh_table();
        table.insert(0, TickInfo {
            liquidity_gross: 1,
            liquidity_net: 0,
            fee_growth_outside_0_x128: U256::from(50u32),
            fee_growth_outside_1_x128: U256::from(50u32),
        });
        // global < outside: a non-wrapping subtraction would panic in debug builds.
        let _ = cross_tick(&mut table, 0, U256::from(10u32), U256::from(10u32));
    }

    #[test]
    fn fee_growth_inside_matches_global_when_current_within_range() {
        let lower = TickInfo { fee_growth_outside_0_x128: U256::from(2u32), fee_growth_outside_1_x128: U256::from(3u32), ..Default::default() };
        let upper = TickInfo { fee_growth_outside_0_x128: U256::from(5u32), fee_growth_outside_1_x128: U256::from(6u32), ..Default::default() };
        let (inside0, inside1) = get_fee_growth_inside(-10, 10, &lower, &upper, 0, U256::from(20u32), U256::from(30u32));
        assert_eq!(inside0, U256::from(20u32) - U256::from(2u32) - U256::from(5u32));
        assert_eq!(inside1, U256::from(30u32) - U256::from(3u32) - U256::from(6u32));
    }
}
