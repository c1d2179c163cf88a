//! Division entry points: routes by operand size to schoolbook (Knuth D,
//! [`knuth`]) or recursive ([`burnikel_ziegler`]) division, and exposes the
//! single-limb division/remainder helpers.

pub mod burnikel_ziegler;
pub mod knuth;

use crate::bigint::{BigInt, QuotAndRem};
use crate::error::{BigIntError, Result};
use crate::limb;

/// `divide(a, b) -> QuotAndRem`. Division truncates toward zero: quotient
/// sign is the product of operand signs, remainder sign matches the
/// dividend (zero if the remainder is zero).
pub fn divide(a: &BigInt, b: &BigInt) -> Result<QuotAndRem> {
    if b.is_zero() {
        return Err(BigIntError::DivisionByZero);
    }
    if a.is_zero() {
        return Ok(QuotAndRem::zero_zero());
    }

    let (q_limbs, r_limbs) = if b.len() >= burnikel_ziegler::WHEN_BURNIKEL_ZIEGLER {
        burnikel_ziegler::divide(a.limbs(), b.limbs())
    } else {
        knuth::divide(a.limbs(), b.limbs())
    };

    let q_sign = a.signum() * b.signum();
    let quotient = BigInt::from_sign_and_limbs(q_sign, q_limbs);
    let r_sign = if r_limbs.is_empty() { 0 } else { a.signum() };
    let remainder = BigInt::from_sign_and_limbs(r_sign, r_limbs);
    Ok(QuotAndRem { quotient, remainder })
}

/// `mod`: a non-negative remainder in `[0, |m|)`, distinct from the
/// truncating remainder `divide` returns (whose sign matches the dividend).
pub fn modulo(a: &BigInt, m: &BigInt) -> Result<BigInt> {
    if m.is_zero() {
        return Err(BigIntError::NegativeModulus);
    }
    let qr = divide(a, &m.abs())?;
    if qr.remainder.is_negative() {
        let m_abs = m.abs();
        Ok(BigInt::from_sign_and_limbs(1, limb::sub(m_abs.limbs(), qr.remainder.limbs())))
    } else {
        Ok(qr.remainder)
    }
}

/// `divideAndRemainderByInteger(bi, int32, sign) -> QuotAndRem`: divides by
/// a signed 32-bit integer.
pub fn divide_and_remainder_by_i32(a: &BigInt, d: i32) -> Result<QuotAndRem> {
    if d == 0 {
        return Err(BigIntError::DivisionByZero);
    }
    let d_mag = (d as i64).unsigned_abs() as u32;
    let (q_limbs, r) = knuth::divide_by_limb(a.limbs(), d_mag);
    let d_sign: i8 = if d < 0 { -1 } else { 1 };
    let q_sign = a.signum() * d_sign;
    let quotient = BigInt::from_sign_and_limbs(q_sign, q_limbs);
    let r_sign: i8 = if r == 0 { 0 } else { a.signum() };
    let remainder = BigInt::from_sign_and_limbs(r_sign, vec![r]);
    Ok(QuotAndRem { quotient, remainder })
}

/// `remainder(bi, int32) -> int32`.
pub fn remainder_i32(a: &BigInt, d: i32) -> Result<i32> {
    let qr = divide_and_remainder_by_i32(a, d)?;
    let mag = qr.remainder.limbs().first().copied().unwrap_or(0) as i64;
    Ok(if qr.remainder.is_negative() { -mag as i32 } else { mag as i32 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_truncates_toward_zero() {
        let a = BigInt::from_i64(-7);
        let b = BigInt::from_i64(2);
        let qr = divide(&a, &b).unwrap();
        // -7 / 2 = -3 remainder -1 (truncating)
        assert_eq!(qr.quotient, BigInt::from_i64(-3));
        assert_eq!(qr.remainder, BigInt::from_i64(-1));
    }

    #[test]
    fn division_by_zero_errors() {
        let a = BigInt::from_i64(5);
        let z = BigInt::zero();
        assert_eq!(divide(&a, &z), Err(BigIntError::DivisionByZero));
    }

    #[test]
    fn modulo_is_nonnegative() {
        let a = BigInt::from_i64(-7);
        let m = BigInt::from_i64(3);
        let r = modulo(&a, &m).unwrap();
        assert_eq!(r, BigInt::from_i64(2));
    }

    #[test]
    fn by_i32_matches_i64_semantics() {
        let a = BigInt::from_i64(100);
        let qr = divide_and_remainder_by_i32(&a, -7).unwrap();
        assert_eq!(qr.quotient, BigInt::from_i64(-14));
        assert_eq!(qr.remainder, BigInt::from_i64(2));
    }
}
