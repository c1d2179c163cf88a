//! Modular exponentiation (component F): `base^exp mod m` for any sign of
//! `base`/`exp` and any non-zero modulus.
//!
//! Odd moduli go through Montgomery exponentiation, either plain
//! square-and-multiply or a sliding window depending on modulus width
//! (built on [`crate::montgomery`]); even moduli split via CRT into a
//! power-of-two part and an odd part, each solved independently and
//! recombined via Garner's formula — the same decomposition
//! `java.math.BigInteger.modPow` uses. Negative exponents delegate to
//! [`crate::modinverse`].

use crate::bigint::BigInt;
use crate::div::knuth;
use crate::error::{BigIntError, Result};
use crate::limb;
use crate::modinverse;
use crate::montgomery;

/// Sliding-window size as a function of the exponent's bit length, per the
/// empirically-tuned thresholds `java.math.BigInteger` uses.
fn window_size(exp_bit_length: u64) -> i64 {
    match exp_bit_length {
        0..=7 => 2,
        8..=36 => 3,
        37..=140 => 4,
        141..=450 => 5,
        451..=1303 => 6,
        1304..=3529 => 7,
        _ => 8,
    }
}

/// Masks `v` down to its low `n` bits, in place.
fn truncate_to_bits(v: &mut Vec<u32>, n: u64) {
    let full_limbs = (n / 32) as usize;
    let rem_bits = (n % 32) as u32;
    let kept = full_limbs + if rem_bits > 0 { 1 } else { 0 };
    if v.len() > kept {
        v.truncate(kept);
    }
    if rem_bits > 0 {
        if let Some(top) = v.get_mut(full_limbs) {
            *top &= (1u32 << rem_bits) - 1;
        }
    }
    limb::trim(v);
}

/// `(a - b) mod 2^n`, both operands treated as non-negative magnitudes.
fn sub_mod_pow2(a: &[u32], b: &[u32], n: u64) -> Vec<u32> {
    let limbs_needed = ((n + 31) / 32) as usize;
    let mut av = a.to_vec();
    av.resize(limbs_needed, 0);
    let mut bv = b.to_vec();
    bv.resize(limbs_needed, 0);
    let mut out = Vec::with_capacity(limbs_needed);
    let mut borrow = 0i64;
    for i in 0..limbs_needed {
        let ai = av[i] as i64;
        let bi = bv[i] as i64;
        let mut diff = ai - bi - borrow;
        if diff < 0 {
            diff += 1i64 << 32;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(diff as u32);
    }
    truncate_to_bits(&mut out, n);
    out
}

/// `x^-1 mod 2^n` via Hensel/Newton lifting, doubling the known-correct
/// bit count each iteration. `x` must be odd.
fn mod_pow2_inverse(x: &[u32], n: u64) -> Vec<u32> {
    let mut y = vec![1u32];
    let mut known = 1u64;
    while known < n {
        let target = (known * 2).min(n);
        let mut xy = limb::mul(x, &y);
        truncate_to_bits(&mut xy, target);
        let two = vec![2u32];
        let two_minus_xy = sub_mod_pow2(&two, &xy, target);
        let mut next = limb::mul(&y, &two_minus_xy);
        truncate_to_bits(&mut next, target);
        y = next;
        known = target;
    }
    truncate_to_bits(&mut y, n);
    y
}

/// `base^exp mod 2^n`, via plain square-and-multiply with every
/// intermediate masked down to `n` bits (cheaper than a full reduction
/// since it's just truncation). When `base` is odd, the exponent is first
/// reduced mod `2^(n-1)` (Euler: the multiplicative order of an odd
/// residue mod `2^n` always divides `phi(2^n) = 2^(n-1)`).
fn pow2_mod_pow(base: &[u32], exp: &BigInt, n: u64) -> Vec<u32> {
    let mut b = base.to_vec();
    truncate_to_bits(&mut b, n);

    let reduced_exp;
    let exp_ref: &BigInt = if b.first().copied().unwrap_or(0) & 1 == 1 {
        let mask_bits = n.saturating_sub(1);
        let mut limbs = exp.limbs().to_vec();
        truncate_to_bits(&mut limbs, mask_bits);
        let sign = if limbs.is_empty() { 0 } else { 1 };
        reduced_exp = BigInt::from_sign_and_limbs(sign, limbs);
        &reduced_exp
    } else {
        exp
    };

    let mut result = vec![1u32];
    let bits = exp_ref.bit_length();
    for i in 0..bits {
        if exp_ref.test_bit(i) {
            result = limb::mul(&result, &b);
            truncate_to_bits(&mut result, n);
        }
        b = limb::mul(&b, &b);
        truncate_to_bits(&mut b, n);
    }
    result
}

/// Sliding-window exponentiation entirely in Montgomery form.
fn sliding_window_pow(
    base_mont: &[u32],
    exp: &BigInt,
    m: &[u32],
    n_prime: u32,
    one_mont: &[u32],
) -> Vec<u32> {
    let bit_len = exp.bit_length();
    if bit_len == 0 {
        return one_mont.to_vec();
    }
    let w = window_size(bit_len);
    let table_size = 1usize << (w as usize - 1);

    let mut table: Vec<Vec<u32>> = Vec::with_capacity(table_size);
    table.push(base_mont.to_vec());
    let base_sq = montgomery::mon_square(base_mont, m, n_prime);
    for idx in 1..table_size {
        let next = montgomery::mon_pro(&table[idx - 1], &base_sq, m, n_prime);
        table.push(next);
    }

    let mut result = one_mont.to_vec();
    let mut i: i64 = bit_len as i64 - 1;
    while i >= 0 {
        if !exp.test_bit(i as u64) {
            result = montgomery::mon_square(&result, m, n_prime);
            i -= 1;
            continue;
        }
        let mut l = w.min(i + 1);
        while l > 1 && !exp.test_bit((i - l + 1) as u64) {
            l -= 1;
        }
        for _ in 0..l {
            result = montgomery::mon_square(&result, m, n_prime);
        }
        let mut window_val: u32 = 0;
        for b in 0..l {
            let bit_idx = (i - b) as u64;
            window_val = (window_val << 1) | (exp.test_bit(bit_idx) as u32);
        }
        let idx = ((window_val - 1) / 2) as usize;
        result = montgomery::mon_pro(&result, &table[idx], m, n_prime);
        i -= l;
    }
    result
}

/// Plain square-and-multiply exponentiation entirely in Montgomery form,
/// used in place of the sliding window when the modulus is a single limb
/// (too narrow for the window table to pay for itself).
fn square_and_multiply(
    base_mont: &[u32],
    exp: &BigInt,
    m: &[u32],
    n_prime: u32,
    one_mont: &[u32],
) -> Vec<u32> {
    let bit_len = exp.bit_length();
    let mut last = one_mont.to_vec();
    let mut i: i64 = bit_len as i64 - 1;
    while i >= 0 {
        last = montgomery::mon_square(&last, m, n_prime);
        if exp.test_bit(i as u64) {
            last = montgomery::mon_pro(&last, base_mont, m, n_prime);
        }
        i -= 1;
    }
    last
}

/// `base^exp mod m` for an odd modulus, via Montgomery form. Dispatches on
/// modulus width: a single-limb modulus goes through plain
/// square-and-multiply, since the sliding window's precomputed odd-power
/// table isn't worth its setup cost at that size.
fn odd_mod_pow(base: &BigInt, exp: &BigInt, m: &BigInt) -> Result<BigInt> {
    debug_assert!(!m.is_even());
    let m_limbs = m.limbs();
    let n_prime = montgomery::calc_n(m_limbs[0]);
    let k = 32 * m_limbs.len() as u64;

    let base_mod = crate::div::modulo(base, m)?;
    let shifted_base = limb::shl(base_mod.limbs(), k);
    let (_, base_mont) = knuth::divide(&shifted_base, m_limbs);

    let one_shifted = limb::get_power_of_two(k);
    let (_, one_mont) = knuth::divide(&one_shifted, m_limbs);

    let result_mont = if m_limbs.len() == 1 {
        square_and_multiply(&base_mont, exp, m_limbs, n_prime, &one_mont)
    } else {
        sliding_window_pow(&base_mont, exp, m_limbs, n_prime, &one_mont)
    };
    let unmont = montgomery::mon_pro(&result_mont, &[1], m_limbs, n_prime);
    let sign = if unmont.is_empty() { 0 } else { 1 };
    Ok(BigInt::from_sign_and_limbs(sign, unmont))
}

/// `base^exp mod m` for an even modulus: CRT split into a power-of-two
/// part and an odd part, recombined via Garner's formula.
fn even_mod_pow(base: &BigInt, exp: &BigInt, m: &BigInt) -> Result<BigInt> {
    let a = m.get_lowest_set_bit().expect("even modulus has a lowest set bit");
    let odd_part_limbs = limb::shr(m.limbs(), a);
    let odd_part = BigInt::from_sign_and_limbs(1, odd_part_limbs.clone());

    let base_mod_m = crate::div::modulo(base, m)?;
    let mut base_mod_2a = base_mod_m.limbs().to_vec();
    truncate_to_bits(&mut base_mod_2a, a);
    let pow2_part = pow2_mod_pow(&base_mod_2a, exp, a);

    let odd_part_result = odd_mod_pow(&base_mod_m, exp, &odd_part)?;
    let mut odd_part_mod_2a = odd_part_result.limbs().to_vec();
    truncate_to_bits(&mut odd_part_mod_2a, a);

    let inv = mod_pow2_inverse(&odd_part_limbs, a);
    let diff = sub_mod_pow2(&pow2_part, &odd_part_mod_2a, a);
    let mut u = limb::mul(&diff, &inv);
    truncate_to_bits(&mut u, a);

    let result_limbs = limb::add(odd_part_result.limbs(), &limb::mul(&odd_part_limbs, &u));
    Ok(BigInt::from_sign_and_limbs(1, result_limbs))
}

/// `modPow(base, exp, m)`, dispatching on the sign of `exp` and the
/// parity of `m`. Requires `m` to be positive; `exp` may be negative, in
/// which case `base` must be invertible mod `m`.
pub fn mod_pow(base: &BigInt, exp: &BigInt, m: &BigInt) -> Result<BigInt> {
    if m.is_zero() || m.is_negative() {
        return Err(BigIntError::NegativeModulus);
    }
    if m.is_one() {
        return Ok(BigInt::zero());
    }
    if exp.is_negative() {
        let inv = modinverse::mod_inverse(base, m).map_err(|_| BigIntError::NegativeExponent)?;
        return mod_pow(&inv, &exp.abs(), m);
    }
    if exp.is_zero() {
        return Ok(BigInt::one());
    }
    if m.is_even() {
        even_mod_pow(base, exp, m)
    } else {
        odd_mod_pow(base, exp, m)
    }
}
