//! Position ledger (C7): tracks each owner's liquidity and the fee growth
//! it has already been credited for.

pub mod types;

use std::collections::HashMap;

use ethnum::U256;

use crate::constants::Q128;
use crate::errors::UpdatePositionError;
use crate::math::{full_math::mul_div, liquidity_math};
use types::{PositionInfo, PositionKey};

pub type PositionTable = HashMap<PositionKey, PositionInfo>;

/// Applies a liquidity delta to a position and settles the fees it has
/// accrued since its last touch. A zero delta on a position with existing
/// liquidity is a "poke": it only harvests fees without resizing the
/// position; a zero delta on an empty position is rejected.
pub fn update_position(
    table: &mut PositionTable,
    key: &PositionKey,
    liquidity_delta: i128,
    fee_growth_inside_0_x128: U256,
    fee_growth_inside_1_x128: U256,
) -> Result<(U256, U256), UpdatePositionError> {
    let mut info = table.get(key).copied().unwrap_or_default();

    if liquidity_delta == 0 && info.liquidity == 0 {
        return Err(UpdatePositionError::CannotUpdateEmptyPosition);
    }

    let liquidity_next = if liquidity_delta == 0 {
        info.liquidity
    } else {
        liquidity_math::add_delta(info.liquidity, liquidity_delta)?
    };

    // Overflow in the fee-growth subtraction is expected: growth
    // accumulators wrap around Q256 and the wrap cancels out correctly.
    let fee_growth_delta_0 = fee_growth_inside_0_x128.wrapping_sub(info.fee_growth_inside_0_last_x128);
    let fee_growth_delta_1 = fee_growth_inside_1_x128.wrapping_sub(info.fee_growth_inside_1_last_x128);

    let fees_owed_0 = mul_div(fee_growth_delta_0, U256::from(info.liquidity), *Q128)?;
    let fees_owed_1 = mul_div(fee_growth_delta_1, U256::from(info.liquidity), *Q128)?;

    info.liquidity = liquidity_next;
    info.fee_growth_inside_0_last_x128 = fee_growth_inside_0_x128;
    info.fee_growth_inside_1_last_x128 = fee_growth_inside_1_x128;

    if info.liquidity == 0 && liquidity_delta != 0 {
        table.remove(key);
    } else {
        table.insert(key.clone(), info);
    }

    Ok((fees_owed_0, fees_owed_1))
}
