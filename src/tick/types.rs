//! Per-tick state (C6). Oracle/TWAP bookkeeping fields carried by the
//! upstream tick struct are intentionally absent here.

use ethnum::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInfo {
    /// Total position liquidity referencing this tick, regardless of side.
    pub liquidity_gross: u128,
    /// Net liquidity added when the tick is crossed left to right.
    pub liquidity_net: i128,
    pub fee_growth_outside_0_x128: U256,
    pub fee_growth_outside_1_x128: U256,
}

impl TickInfo {
    pub fn is_initialized(&self) -> bool {
        self.liquidity_gross != 0
    }
}
