//! Arbitrary-precision signed-integer division and modular arithmetic:
//! schoolbook and recursive division, binary GCD, and Montgomery-backed
//! modular exponentiation/inversion.

pub mod bigint;
pub mod div;
pub mod error;
pub mod gcd;
pub mod limb;
pub mod modinverse;
pub mod modpow;
pub mod montgomery;

pub use bigint::{BigInt, QuotAndRem};
pub use error::{BigIntError, Result};

/// `divide(a, b) -> QuotAndRem`, truncating toward zero.
pub fn divide(a: &BigInt, b: &BigInt) -> Result<QuotAndRem> {
    div::divide(a, b)
}

/// `mod`: the non-negative remainder of `a` in `[0, |m|)`.
pub fn modulo(a: &BigInt, m: &BigInt) -> Result<BigInt> {
    div::modulo(a, m)
}

/// `divideAndRemainderByInteger(bi, int32)`.
pub fn divide_and_remainder_by_i32(a: &BigInt, d: i32) -> Result<QuotAndRem> {
    div::divide_and_remainder_by_i32(a, d)
}

/// `remainder(bi, int32) -> int32`.
pub fn remainder_i32(a: &BigInt, d: i32) -> Result<i32> {
    div::remainder_i32(a, d)
}

/// `gcdBinary(bi, bi) -> bi`.
pub fn gcd_binary(a: &BigInt, b: &BigInt) -> BigInt {
    gcd::gcd_binary(a, b)
}

/// `gcdBinary(int, int) -> int`.
pub fn gcd_binary_u64(a: u64, b: u64) -> u64 {
    gcd::gcd_binary_u64(a, b)
}

/// `modPow(base, exp, m)`.
pub fn mod_pow(base: &BigInt, exp: &BigInt, m: &BigInt) -> Result<BigInt> {
    modpow::mod_pow(base, exp, m)
}

/// `modInverse(a, m)`.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt> {
    modinverse::mod_inverse(a, m)
}
