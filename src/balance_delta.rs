//! Signed token-amount pair returned by `modify_liquidity` and `swap` (§6):
//! the engine's contribution to the caller's deferred currency-delta ledger.

use std::ops::{Add, Sub};

use ethnum::I256;

use crate::errors::BalanceDeltaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceDelta {
    amount0: I256,
    amount1: I256,
}

impl BalanceDelta {
    pub const ZERO: BalanceDelta = BalanceDelta { amount0: I256::ZERO, amount1: I256::ZERO };

    pub fn new(amount0: I256, amount1: I256) -> BalanceDelta {
        BalanceDelta { amount0, amount1 }
    }

    pub fn amount0(&self) -> I256 {
        self.amount0
    }

    pub fn amount1(&self) -> I256 {
        self.amount1
    }

    pub fn add(self, other: BalanceDelta) -> Result<BalanceDelta, BalanceDeltaError> {
        Ok(BalanceDelta {
            amount0: self.amount0.checked_add(other.amount0).ok_or(BalanceDeltaError::Overflow)?,
            amount1: self.amount1.checked_add(other.amount1).ok_or(BalanceDeltaError::Overflow)?,
        })
    }

    pub fn sub(self, other: BalanceDelta) -> Result<BalanceDelta, BalanceDeltaError> {
        Ok(BalanceDelta {
            amount0: self.amount0.checked_sub(other.amount0).ok_or(BalanceDeltaError::Underflow)?,
            amount1: self.amount1.checked_sub(other.amount1).ok_or(BalanceDeltaError::Underflow)?,
        })
    }
}

impl Add for BalanceDelta {
    type Output = Result<BalanceDelta, BalanceDeltaError>;
    fn add(self, other: BalanceDelta) -> Self::Output {
        BalanceDelta::add(self, other)
    }
}

impl Sub for BalanceDelta {
    type Output = Result<BalanceDelta, BalanceDeltaError>;
    fn sub(self, other: BalanceDelta) -> Self::Output {
        BalanceDelta::sub(self, other)
    }
}
