//! Conversions between `num_bigint::BigUint` and `ethnum`'s fixed-width integers,
//! needed at the boundary of the [`super::full_math`] widening-multiply routines.

use ethnum::U256;
use num_bigint::BigUint;

pub fn big_uint_to_u256(value: BigUint) -> Option<U256> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    let mut buf = [0u8; 32];
    buf[32 - bytes.len()..].copy_from_slice(&bytes);
    Some(U256::from_be_bytes(buf))
}

pub fn u256_to_big_uint(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes())
}
