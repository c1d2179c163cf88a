//! Modular inverse (component G): `a^-1 mod m`.
//!
//! Two algorithms: Lórencz's extended binary GCD works for any modulus
//! (needed because the Montgomery route below requires an odd one);
//! Savaş-Koç's "almost inverse" is the Montgomery-friendly route used when
//! `m` is odd, which is the common case when this feeds
//! [`crate::modpow`]'s negative-exponent path. Sign reconstruction follows
//! [`crate::div::modulo`]'s own pattern.

use crate::bigint::BigInt;
use crate::error::{BigIntError, Result};
use crate::gcd;
use crate::limb;
use crate::montgomery;
use std::cmp::Ordering;

fn nonneg(limbs: Vec<u32>) -> BigInt {
    let sign = if limbs.is_empty() { 0 } else { 1 };
    BigInt::from_sign_and_limbs(sign, limbs)
}

fn add_signed(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() {
        return b.clone();
    }
    if b.is_zero() {
        return a.clone();
    }
    if a.signum() == b.signum() {
        BigInt::from_sign_and_limbs(a.signum(), limb::add(a.limbs(), b.limbs()))
    } else {
        match a.cmp_magnitude(b) {
            Ordering::Equal => BigInt::zero(),
            Ordering::Greater => {
                BigInt::from_sign_and_limbs(a.signum(), limb::sub(a.limbs(), b.limbs()))
            }
            Ordering::Less => {
                BigInt::from_sign_and_limbs(b.signum(), limb::sub(b.limbs(), a.limbs()))
            }
        }
    }
}

fn sub_signed(a: &BigInt, b: &BigInt) -> BigInt {
    add_signed(a, &b.negate())
}

fn half_signed(x: &BigInt) -> BigInt {
    if x.is_zero() {
        return BigInt::zero();
    }
    BigInt::from_sign_and_limbs(x.signum(), limb::shr(x.limbs(), 1))
}

fn reduce_into_range(x: &BigInt, m: &BigInt) -> BigInt {
    crate::div::modulo(x, m).expect("modulus already validated positive")
}

/// Lórencz's extended binary GCD: works for any modulus, odd or even.
/// Assumes `gcd(a, m) == 1` and `0 <= a < m`.
///
/// The halving of a coefficient by 2 is only valid when the coefficient is
/// even on the nose; unlike a halving scheme built around `m` being odd (so
/// that an odd coefficient could be fixed up via `(x+m)/2`), this tracks two
/// coefficients per side (`aa`/`bb` and `cc`/`dd`) and restores evenness by
/// adding the *other* reduced operand instead, which works regardless of
/// `m`'s parity.
fn mod_inverse_lorencz(a: &BigInt, m: &BigInt) -> BigInt {
    let mut x = a.clone();
    let mut y = m.clone();
    while x.is_even() && y.is_even() {
        x = half_signed(&x);
        y = half_signed(&y);
    }

    let mut u = x.clone();
    let mut v = y.clone();
    let mut aa = BigInt::one();
    let mut bb = BigInt::zero();
    let mut cc = BigInt::zero();
    let mut dd = BigInt::one();

    while !u.is_zero() {
        while u.is_even() {
            u = half_signed(&u);
            if aa.is_even() && bb.is_even() {
                aa = half_signed(&aa);
                bb = half_signed(&bb);
            } else {
                aa = half_signed(&add_signed(&aa, &y));
                bb = half_signed(&sub_signed(&bb, &x));
            }
        }
        while v.is_even() {
            v = half_signed(&v);
            if cc.is_even() && dd.is_even() {
                cc = half_signed(&cc);
                dd = half_signed(&dd);
            } else {
                cc = half_signed(&add_signed(&cc, &y));
                dd = half_signed(&sub_signed(&dd, &x));
            }
        }
        if u.cmp_magnitude(&v) != Ordering::Less {
            u = sub_signed(&u, &v);
            aa = sub_signed(&aa, &cc);
            bb = sub_signed(&bb, &dd);
        } else {
            v = sub_signed(&v, &u);
            cc = sub_signed(&cc, &aa);
            dd = sub_signed(&dd, &bb);
        }
    }

    // Invariant: cc*x + dd*y == gcd(x, y) throughout, using the original
    // (pre-halving) x and y — so with gcd(a, m) == 1, cc*a + dd*m == 1 and
    // cc mod m is a's inverse.
    reduce_into_range(&cc, m)
}

/// Removes the excess factor of `2^k` that [`mod_inverse_montgomery`]'s
/// phase 1 leaves behind, via `monPro` itself rather than a manual halving
/// loop: `monPro(x, y, m, n') = x*y*2^-M mod m` where `M = 32*m.len()` is
/// the Montgomery base, so one `monPro(r, 2^(M - k%M), ...)` call divides
/// out the partial `k % M` bits and each further `monPro(_, 1, ...)` call
/// divides out one more full `M`-bit chunk.
fn montgomery_shift_down(r: &BigInt, k: u64, m: &BigInt, n_prime: u32) -> BigInt {
    let m_limbs = m.limbs();
    let m_bits = 32 * m_limbs.len() as u64;
    let mut x = r.limbs().to_vec();

    let rem = k % m_bits;
    let full_chunks = k / m_bits;
    if rem != 0 {
        let factor = limb::get_power_of_two(m_bits - rem);
        x = montgomery::mon_pro(&x, &factor, m_limbs, n_prime);
    }
    for _ in 0..full_chunks {
        x = montgomery::mon_pro(&x, &[1], m_limbs, n_prime);
    }
    nonneg(x)
}

/// Savaş-Koç's almost-inverse algorithm (odd modulus): a binary-gcd-style
/// phase 1 produces `r = a^-1 * 2^k mod m` for some `k`, then phase 2
/// removes that extra factor via [`montgomery_shift_down`].
fn mod_inverse_montgomery(a: &BigInt, m: &BigInt) -> BigInt {
    debug_assert!(!m.is_even());
    let mut u = m.clone();
    let mut v = a.clone();
    let mut r = BigInt::zero();
    let mut s = BigInt::one();
    let mut k: u64 = 0;

    while !v.is_zero() {
        if u.is_even() {
            u = nonneg(limb::shr(u.limbs(), 1));
            s = nonneg(limb::shl(s.limbs(), 1));
        } else if v.is_even() {
            v = nonneg(limb::shr(v.limbs(), 1));
            r = nonneg(limb::shl(r.limbs(), 1));
        } else if u.cmp_magnitude(&v) == Ordering::Greater {
            u = nonneg(limb::shr(&limb::sub(u.limbs(), v.limbs()), 1));
            r = nonneg(limb::add(r.limbs(), s.limbs()));
            s = nonneg(limb::shl(s.limbs(), 1));
        } else {
            v = nonneg(limb::shr(&limb::sub(v.limbs(), u.limbs()), 1));
            s = nonneg(limb::add(s.limbs(), r.limbs()));
            r = nonneg(limb::shl(r.limbs(), 1));
        }
        k += 1;
    }

    if r.cmp_magnitude(m) != Ordering::Less {
        r = nonneg(limb::sub(r.limbs(), m.limbs()));
    }
    r = nonneg(limb::sub(m.limbs(), r.limbs()));

    let n_prime = montgomery::calc_n(m.limbs()[0]);
    montgomery_shift_down(&r, k, m, n_prime)
}

/// `modInverse(a, m)`: `m` must be positive; errors with
/// [`BigIntError::NotInvertible`] when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt> {
    if m.is_zero() || m.is_negative() {
        return Err(BigIntError::NegativeModulus);
    }
    if m.is_one() {
        return Ok(BigInt::zero());
    }

    let a_mod = crate::div::modulo(a, m)?;
    if a_mod.is_zero() {
        return Err(BigIntError::NotInvertible);
    }
    if !gcd::gcd_binary(&a_mod, m).is_one() {
        return Err(BigIntError::NotInvertible);
    }

    let inv = if m.is_even() {
        mod_inverse_lorencz(&a_mod, m)
    } else {
        mod_inverse_montgomery(&a_mod, m)
    };
    Ok(inv)
}
