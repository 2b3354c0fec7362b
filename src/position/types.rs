//! Position identity and ledger entry (C7).

use ethnum::U256;

/// Identifies a liquidity position. `salt` lets one owner hold multiple
/// independent positions over the same tick range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub owner: [u8; 32],
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub salt: [u8; 32],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionInfo {
    pub liquidity: u128,
    pub fee_growth_inside_0_last_x128: U256,
    pub fee_growth_inside_1_last_x128: U256,
}
