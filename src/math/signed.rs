//! Literal `(magnitude, sign)` signed-128 arithmetic (C1, secondary path).
//!
//! The pool engine itself works entirely in native `i128`; this module
//! exists because SPEC_FULL.md §8 property 9 is phrased directly in terms of
//! a magnitude-and-sign pair, and porting that shape literally is the most
//! direct test of the underlying rule.

/// A signed 128-bit magnitude, with zero canonically represented as
/// `(0, true)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signed128 {
    pub magnitude: u128,
    pub is_positive: bool,
}

impl Signed128 {
    pub fn new(magnitude: u128, is_positive: bool) -> Self {
        if magnitude == 0 {
            Self { magnitude: 0, is_positive: true }
        } else {
            Self { magnitude, is_positive }
        }
    }

    pub fn from_i128(v: i128) -> Self {
        if v >= 0 {
            Self::new(v as u128, true)
        } else {
            Self::new(v.unsigned_abs(), false)
        }
    }

    pub fn to_i128(self) -> Option<i128> {
        if self.is_positive {
            i128::try_from(self.magnitude).ok()
        } else {
            i128::try_from(self.magnitude).ok().map(|m| -m)
        }
    }

    pub fn neg(self) -> Self {
        Self::new(self.magnitude, !self.is_positive)
    }

    /// Same sign: magnitudes add, sign preserved. Different sign: larger
    /// magnitude minus smaller, sign of the larger.
    pub fn add(self, other: Self) -> Self {
        if self.is_positive == other.is_positive {
            Self::new(self.magnitude + other.magnitude, self.is_positive)
        } else if self.magnitude >= other.magnitude {
            Self::new(self.magnitude - other.magnitude, self.is_positive)
        } else {
            Self::new(other.magnitude - self.magnitude, other.is_positive)
        }
    }

    pub fn sub(self, other: Self) -> Self {
        self.add(other.neg())
    }
}
