//! Canonical keccak256 identities for pools and positions (§6). Internal
//! storage keys these by the plain struct instead (`Hash`/`Eq` derive) for
//! HashMap efficiency; these hashes are the externally-addressable identity.

use sha3::{Digest, Keccak256};

use crate::pool::types::PoolId;
use crate::position::types::PositionKey;

pub fn pool_id_hash(pool_id: &PoolId) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(pool_id.token0);
    hasher.update(pool_id.token1);
    hasher.update(pool_id.fee.to_le_bytes());
    hasher.update(pool_id.tick_spacing.to_le_bytes());
    hasher.finalize().into()
}

pub fn position_key_hash(key: &PositionKey) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(key.owner);
    hasher.update(key.tick_lower.to_le_bytes());
    hasher.update(key.tick_upper.to_le_bytes());
    hasher.update(key.salt);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_id_hash_is_deterministic() {
        let id = PoolId { token0: [1u8; 32], token1: [2u8; 32], fee: 3000, tick_spacing: 60 };
        assert_eq!(pool_id_hash(&id), pool_id_hash(&id));
    }

    #[test]
    fn pool_id_hash_distinguishes_fee_tiers() {
        let a = PoolId { token0: [1u8; 32], token1: [2u8; 32], fee: 500, tick_spacing: 10 };
        let b = PoolId { token0: [1u8; 32], token1: [2u8; 32], fee: 3000, tick_spacing: 60 };
        assert_ne!(pool_id_hash(&a), pool_id_hash(&b));
    }

    #[test]
    fn position_key_hash_distinguishes_salt() {
        let a = PositionKey { owner: [1u8; 32], tick_lower: -60, tick_upper: 60, salt: [0u8; 32] };
        let b = PositionKey { owner: [1u8; 32], tick_lower: -60, tick_upper: 60, salt: [1u8; 32] };
        assert_ne!(position_key_hash(&a), position_key_hash(&b));
    }
}
