//! Full-precision `mul_div` over 256-bit operands with a 512-bit intermediate
//! product, widened through `num_bigint::BigUint` rather than hand-rolled
//! 128-bit limb arithmetic — the teacher's own approach, and the one the rest
//! of this corpus reaches for whenever a native int is too narrow.

use ethnum::U256;
use num_bigint::BigUint;
use num_traits::Zero;

use super::safe_cast::big_uint_to_u256;
use crate::errors::FullMathError;

/// floor(a * b / denominator), with the multiplication carried out at full
/// 512-bit width so it never overflows before the division is applied.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, FullMathError> {
    if denominator == U256::ZERO {
        return Err(FullMathError::DenominatorZero);
    }

    let product = BigUint::from_bytes_be(&a.to_be_bytes()) * BigUint::from_bytes_be(&b.to_be_bytes());
    if product.bits() > 512 {
        return Err(FullMathError::Overflow);
    }

    let quotient = product / BigUint::from_bytes_be(&denominator.to_be_bytes());
    if quotient.bits() > 256 {
        return Err(FullMathError::Overflow);
    }

    Ok(big_uint_to_u256(quotient).expect("quotient fits in 256 bits"))
}

/// ceil(a * b / denominator).
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, FullMathError> {
    if denominator == U256::ZERO {
        return Err(FullMathError::DenominatorZero);
    }

    let product = BigUint::from_bytes_be(&a.to_be_bytes()) * BigUint::from_bytes_be(&b.to_be_bytes());
    if product.bits() > 512 {
        return Err(FullMathError::Overflow);
    }

    let denominator_big = BigUint::from_bytes_be(&denominator.to_be_bytes());
    let quotient = &product / &denominator_big;
    let remainder = &product % &denominator_big;
    let result = if remainder.is_zero() {
        quotient
    } else {
        quotient + BigUint::from(1u32)
    };

    if result.bits() > 256 {
        return Err(FullMathError::Overflow);
    }

    Ok(big_uint_to_u256(result).expect("result fits in 256 bits"))
}

/// (a * b) mod m, computed over the widened product so it is correct even
/// when a * b overflows 256 bits.
pub fn mul_mod(a: U256, b: U256, m: U256) -> Result<U256, FullMathError> {
    if m == U256::ZERO {
        return Err(FullMathError::DenominatorZero);
    }
    let product = BigUint::from_bytes_be(&a.to_be_bytes()) * BigUint::from_bytes_be(&b.to_be_bytes());
    let remainder = product % BigUint::from_bytes_be(&m.to_be_bytes());
    Ok(big_uint_to_u256(remainder).expect("remainder fits in 256 bits"))
}

/// ceil(x / y); division by zero returns zero rather than erroring, matching
/// the source's convention that callers check the denominator themselves.
pub fn div_rounding_up(x: U256, y: U256) -> U256 {
    if y == U256::ZERO {
        return U256::ZERO;
    }
    let quotient = x / y;
    let remainder = x % y;
    quotient + if remainder > U256::ZERO { U256::ONE } else { U256::ZERO }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{Q128, Q96};

    const MAX_UINT256: U256 = U256::MAX;

    #[test]
    fn reverts_if_denominator_is_zero() {
        assert_eq!(mul_div(Q128.wrapping_mul(U256::from(5u128)), Q96.wrapping_mul(U256::from(2u128)), U256::ZERO), Err(FullMathError::DenominatorZero));
    }

    #[test]
    fn reverts_on_overflow() {
        assert_eq!(mul_div(MAX_UINT256, MAX_UINT256, U256::from(1u128)), Err(FullMathError::Overflow));
    }

    #[test]
    fn all_max_inputs() {
        assert_eq!(mul_div(MAX_UINT256, MAX_UINT256, MAX_UINT256).unwrap(), MAX_UINT256);
    }

    #[test]
    fn accurate_without_phantom_overflow() {
        let result = Q96.wrapping_mul(U256::from(50u128)) / U256::from(100u128);
        let a = *Q128;
        let b = U256::from(50u128).wrapping_mul(*Q96) / U256::from(100u128);
        let d = *Q128;
        assert_eq!(mul_div(a, b, d).unwrap(), result);
    }

    #[test]
    fn rounding_up_adds_one_iff_remainder_nonzero() {
        let a = U256::from(7u128);
        let b = U256::from(3u128);
        let d = U256::from(2u128);
        let down = mul_div(a, b, d).unwrap();
        let up = mul_div_rounding_up(a, b, d).unwrap();
        assert_eq!(up - down, U256::ONE);
    }

    #[test]
    fn rounding_up_matches_down_when_exact() {
        let a = U256::from(8u128);
        let b = U256::from(4u128);
        let d = U256::from(2u128);
        assert_eq!(mul_div(a, b, d).unwrap(), mul_div_rounding_up(a, b, d).unwrap());
    }

    #[test]
    fn mul_mod_basic() {
        assert_eq!(mul_mod(U256::from(10u128), U256::from(10u128), U256::from(7u128)).unwrap(), U256::from(2u128));
    }

    #[test]
    fn mul_mod_zero_modulus_errors() {
        assert_eq!(mul_mod(U256::from(1u128), U256::from(1u128), U256::ZERO), Err(FullMathError::DenominatorZero));
    }

    #[test]
    fn div_rounding_up_basic() {
        assert_eq!(div_rounding_up(U256::from(7u128), U256::from(2u128)), U256::from(4u128));
        assert_eq!(div_rounding_up(U256::from(6u128), U256::from(2u128)), U256::from(3u128));
    }

    proptest::proptest! {
        #[test]
        fn rounding_up_never_exceeds_by_more_than_one(a in 1u128..u128::MAX, b in 1u128..u128::MAX, d in 1u128..u128::MAX) {
            let down = mul_div(U256::from(a), U256::from(b), U256::from(d));
            let up = mul_div_rounding_up(U256::from(a), U256::from(b), U256::from(d));
            if let (Ok(down), Ok(up)) = (down, up) {
                let diff = up - down;
                proptest::prop_assert!(diff == U256::ZERO || diff == U256::ONE);
            }
        }
    }
}
