//! Pool identity and state (§3, §6).

use ethnum::U256;

use crate::constants::{MAX_TICK_SPACING, MIN_TICK_SPACING};
use crate::errors::PoolIdError;
use crate::position::types::PositionKey;
use crate::tick::types::TickInfo;
use crate::tick_bitmap::TickBitmap;

/// A pool's registry-level identity: token pair, fee tier, and tick spacing.
/// `token0 < token1` lexicographically is enforced by the constructor, not
/// by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId {
    pub token0: [u8; 32],
    pub token1: [u8; 32],
    pub fee: u16,
    pub tick_spacing: i32,
}

impl PoolId {
    pub fn new(token_a: [u8; 32], token_b: [u8; 32], fee: u16, tick_spacing: i32) -> Result<PoolId, PoolIdError> {
        if tick_spacing > MAX_TICK_SPACING {
            return Err(PoolIdError::TickSpacingTooLarge(tick_spacing));
        }
        if tick_spacing < MIN_TICK_SPACING {
            return Err(PoolIdError::TickSpacingTooSmall(tick_spacing));
        }
        if token_a >= token_b {
            return Err(PoolIdError::InvalidTokenOrder);
        }
        Ok(PoolId { token0: token_a, token1: token_b, fee, tick_spacing })
    }
}

/// Tunables fixed at `initialize` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub tick_spacing: i32,
    pub initial_lp_fee: u32,
}

/// A single concentrated-liquidity pool: current price/tick/liquidity, the
/// fee-growth accumulators, and its sparse tick table, tick bitmap, and
/// position ledger.
#[derive(Debug, Clone)]
pub struct Pool {
    /// Zero iff the pool has not been initialized yet.
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub liquidity: u128,
    pub lp_fee: u32,
    pub protocol_fee: u16,
    pub tick_spacing: i32,
    pub max_liquidity_per_tick: u128,
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
    pub ticks: std::collections::HashMap<i32, TickInfo>,
    pub bitmap: TickBitmap,
    pub positions: std::collections::HashMap<PositionKey, crate::position::types::PositionInfo>,
}

impl Pool {
    pub fn is_initialized(&self) -> bool {
        self.sqrt_price_x96 != U256::ZERO
    }

    pub fn uninitialized() -> Pool {
        Pool {
            sqrt_price_x96: U256::ZERO,
            tick: 0,
            liquidity: 0,
            lp_fee: 0,
            protocol_fee: 0,
            tick_spacing: 1,
            max_liquidity_per_tick: 0,
            fee_growth_global_0_x128: U256::ZERO,
            fee_growth_global_1_x128: U256::ZERO,
            ticks: std::collections::HashMap::new(),
            bitmap: TickBitmap::new(),
            positions: std::collections::HashMap::new(),
        }
    }
}
