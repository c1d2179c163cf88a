//! The signed-magnitude big-integer value type.
//!
//! `BigInt` is logically immutable once constructed: every public operation
//! returns a freshly built value rather than mutating an existing one.

use crate::limb;
use std::cmp::Ordering;

/// A signed arbitrary-precision integer: sign plus little-endian 32-bit
/// limbs, normalised (invariant N1: no nonzero limb beyond `length`;
/// invariant N2: `sign == 0` iff there are no limbs).
#[derive(Debug, Clone)]
pub struct BigInt {
    sign: i8,
    limbs: Vec<u32>,
}

impl BigInt {
    pub fn zero() -> Self {
        Self { sign: 0, limbs: Vec::new() }
    }

    pub fn one() -> Self {
        Self { sign: 1, limbs: vec![1] }
    }

    /// Builds a value from a sign and a limb vector, normalising it.
    ///
    /// `sign` must be `-1`, `0`, or `1`; passing `0` with nonzero limbs (or
    /// a nonzero sign with only zero limbs) is a caller bug and panics in
    /// debug builds, not a recoverable error.
    pub fn from_sign_and_limbs(sign: i8, mut limbs: Vec<u32>) -> Self {
        debug_assert!(sign == -1 || sign == 0 || sign == 1);
        limb::trim(&mut limbs);
        if limbs.is_empty() {
            Self { sign: 0, limbs }
        } else {
            debug_assert_ne!(sign, 0, "nonzero limbs require a nonzero sign");
            Self { sign, limbs }
        }
    }

    pub fn from_i64(v: i64) -> Self {
        if v == 0 {
            return Self::zero();
        }
        let sign = if v < 0 { -1 } else { 1 };
        let mag = v.unsigned_abs();
        Self::from_sign_and_limbs(sign, vec![mag as u32, (mag >> 32) as u32])
    }

    pub fn from_u64(v: u64) -> Self {
        if v == 0 {
            return Self::zero();
        }
        Self::from_sign_and_limbs(1, vec![v as u32, (v >> 32) as u32])
    }

    pub fn signum(&self) -> i8 {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    pub fn is_one(&self) -> bool {
        self.sign == 1 && self.limbs == [1]
    }

    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }

    pub fn is_even(&self) -> bool {
        !limb::test_bit(&self.limbs, 0)
    }

    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    pub fn len(&self) -> usize {
        self.limbs.len()
    }

    pub fn negate(&self) -> Self {
        Self { sign: -self.sign, limbs: self.limbs.clone() }
    }

    pub fn abs(&self) -> Self {
        Self { sign: self.sign.abs(), limbs: self.limbs.clone() }
    }

    pub fn bit_length(&self) -> u64 {
        limb::bit_length(&self.limbs)
    }

    pub fn get_lowest_set_bit(&self) -> Option<u64> {
        limb::get_lowest_set_bit(&self.limbs)
    }

    pub fn test_bit(&self, i: u64) -> bool {
        limb::test_bit(&self.limbs, i)
    }

    /// Magnitude-only comparison, ignoring sign.
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        limb::cmp(&self.limbs, &other.limbs)
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.limbs == other.limbs
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {
                if self.sign >= 0 {
                    self.cmp_magnitude(other)
                } else {
                    other.cmp_magnitude(self)
                }
            }
            other => other,
        }
    }
}

/// A quotient/remainder pair, both normalised.
#[derive(Debug, Clone)]
pub struct QuotAndRem {
    pub quotient: BigInt,
    pub remainder: BigInt,
}

impl QuotAndRem {
    pub fn zero_zero() -> Self {
        Self { quotient: BigInt::zero(), remainder: BigInt::zero() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_i64_roundtrip() {
        for v in [0i64, 1, -1, i64::MAX, i64::MIN, 12345, -98765] {
            let bi = BigInt::from_i64(v);
            assert_eq!(bi.is_zero(), v == 0);
            if v < 0 {
                assert!(bi.is_negative());
            }
        }
    }

    #[test]
    fn ordering_respects_sign() {
        let neg = BigInt::from_i64(-5);
        let pos = BigInt::from_i64(5);
        let zero = BigInt::zero();
        assert!(neg < zero);
        assert!(zero < pos);
        assert!(neg < pos);
    }

    #[test]
    fn zero_has_no_limbs() {
        let z = BigInt::zero();
        assert_eq!(z.signum(), 0);
        assert!(z.limbs().is_empty());
    }
}
