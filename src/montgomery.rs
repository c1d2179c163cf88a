//! Montgomery core (component E): modular multiplication/squaring in
//! Montgomery form, the engine [`crate::modpow`] and the Savaş-Koç branch
//! of [`crate::modinverse`] build on.

use crate::limb;
use std::cmp::Ordering;

/// Adds `scalar * v` into `res` starting at limb offset `offset`,
/// propagating carry as far as needed within `res`.
fn add_scaled_into(res: &mut [u32], offset: usize, v: &[u32], scalar: u32) {
    let mut carry: u64 = 0;
    for (k, &vk) in v.iter().enumerate() {
        let idx = offset + k;
        let sum = res[idx] as u64 + (scalar as u64) * (vk as u64) + carry;
        res[idx] = sum as u32;
        carry = sum >> 32;
    }
    let mut idx = offset + v.len();
    while carry != 0 {
        let sum = res[idx] as u64 + carry;
        res[idx] = sum as u32;
        carry = sum >> 32;
        idx += 1;
    }
}

/// `finalSubtraction`: if the top limb is non-zero or `wide`'s low
/// `m.len()` limbs are `>= m`, subtract `m` in place. `wide` has exactly
/// `m.len() + 1` limbs on entry; the result is normalised and has at most
/// `m.len()` limbs.
fn final_subtraction(wide: &mut Vec<u32>, m: &[u32]) {
    let overflow = *wide.last().unwrap();
    let needs_sub = overflow != 0 || limb::cmp(&wide[..m.len()], m) != Ordering::Less;
    if needs_sub {
        *wide = limb::sub(wide, m);
    }
    limb::trim(wide);
}

/// Computes `n' = (-m[0]^-1) mod 2^32` by bit-lifting, using only the
/// modulus's low limb.
pub fn calc_n(m0: u32) -> u32 {
    let mut n_prime: u32 = 1;
    for k in 1..32u32 {
        if (m0.wrapping_mul(n_prime) & (1 << k)) != 0 {
            n_prime |= 1 << k;
        }
    }
    n_prime.wrapping_neg()
}

/// `monPro(a, b, m, n') = (a*b*R^-1) mod m`, via the fused CIOS
/// (coarsely integrated operand scanning) multiply-and-reduce loop.
pub fn mon_pro(a: &[u32], b: &[u32], m: &[u32], n_prime: u32) -> Vec<u32> {
    let m_len = m.len();
    let mut res = vec![0u32; 2 * m_len + 2];
    let b0 = b.first().copied().unwrap_or(0);
    for i in 0..m_len {
        let ai = a.get(i).copied().unwrap_or(0);
        let u = res[i].wrapping_add(ai.wrapping_mul(b0)).wrapping_mul(n_prime);
        add_scaled_into(&mut res, i, b, ai);
        add_scaled_into(&mut res, i, m, u);
    }
    let mut wide = res[m_len..=2 * m_len].to_vec();
    final_subtraction(&mut wide, m);
    wide
}

/// Squares `a`, exploiting symmetry: each off-diagonal product `a[i]*a[j]`
/// (`i<j`) is computed once and accumulated (stage 1), the whole
/// accumulator is doubled via a left shift by one bit with its own carry
/// chain (stage 2), then the diagonal terms `a[i]^2` are added in with a
/// third, independent carry chain (stage 3). The three stages are kept
/// separate deliberately: fusing the doubling shift into the accumulation
/// loop drops carry bits at limb boundaries.
fn square_limbs(a: &[u32]) -> Vec<u32> {
    let n = a.len();
    let mut acc = vec![0u32; 2 * n + 1];

    for i in 0..n {
        if a[i] == 0 {
            continue;
        }
        let mut carry: u64 = 0;
        for j in (i + 1)..n {
            let idx = i + j;
            let prod = (a[i] as u64) * (a[j] as u64) + acc[idx] as u64 + carry;
            acc[idx] = prod as u32;
            carry = prod >> 32;
        }
        let mut idx = i + n;
        while carry != 0 {
            let sum = acc[idx] as u64 + carry;
            acc[idx] = sum as u32;
            carry = sum >> 32;
            idx += 1;
        }
    }

    let mut carry_bit: u32 = 0;
    for limb in acc.iter_mut() {
        let new_carry = *limb >> 31;
        *limb = (*limb << 1) | carry_bit;
        carry_bit = new_carry;
    }
    debug_assert_eq!(carry_bit, 0, "square overflowed its accumulator width");

    for i in 0..n {
        let sq = (a[i] as u64) * (a[i] as u64);
        let mut carry = sq & 0xFFFF_FFFF;
        let sum_lo = acc[2 * i] as u64 + carry;
        acc[2 * i] = sum_lo as u32;
        carry = (sum_lo >> 32) + (sq >> 32);
        let sum_hi = acc[2 * i + 1] as u64 + carry;
        acc[2 * i + 1] = sum_hi as u32;
        let mut carry = sum_hi >> 32;
        let mut idx = 2 * i + 2;
        while carry != 0 {
            let sum = acc[idx] as u64 + carry;
            acc[idx] = sum as u32;
            carry = sum >> 32;
            idx += 1;
        }
    }
    acc
}

/// Standalone Montgomery reduction (REDC) of an already-formed product,
/// shared by [`mon_square`] after it has built `a^2` via symmetry.
fn redc(product: &[u32], m: &[u32], n_prime: u32) -> Vec<u32> {
    let m_len = m.len();
    let mut t = vec![0u32; 2 * m_len + 2];
    let n = product.len().min(t.len());
    t[..n].copy_from_slice(&product[..n]);
    for i in 0..m_len {
        let u = t[i].wrapping_mul(n_prime);
        add_scaled_into(&mut t, i, m, u);
    }
    let mut wide = t[m_len..=2 * m_len].to_vec();
    final_subtraction(&mut wide, m);
    wide
}

/// `monSquare(a, m, n')`: `monPro(a, a, m, n')` computed via symmetry.
pub fn mon_square(a: &[u32], m: &[u32], n_prime: u32) -> Vec<u32> {
    let product = square_limbs(a);
    redc(&product, m, n_prime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::div::knuth;

    fn mont_context(m: &[u32]) -> (u64, u32) {
        let k = 32 * m.len() as u64;
        (k, calc_n(m[0]))
    }

    fn to_mont(x: &[u32], m: &[u32], k: u64) -> Vec<u32> {
        let shifted = limb::shl(x, k);
        let (_, r) = knuth::divide(&shifted, m);
        r
    }

    #[test]
    fn mon_pro_matches_naive_modmul() {
        let m = vec![0xFFFF_FFFBu32]; // a prime close to 2^32
        let (k, n_prime) = mont_context(&m);
        let a = vec![123456u32];
        let b = vec![987654u32];

        let a_mont = to_mont(&a, &m, k);
        let b_mont = to_mont(&b, &m, k);
        let prod_mont = mon_pro(&a_mont, &b_mont, &m, n_prime);

        // unmont: monPro(prod_mont, 1, m, n') == a*b mod m
        let unmont = mon_pro(&prod_mont, &[1], &m, n_prime);
        let expected = {
            let raw = limb::mul(&a, &b);
            let (_, r) = knuth::divide(&raw, &m);
            r
        };
        assert_eq!(unmont, expected);
    }

    #[test]
    fn mon_square_matches_mon_pro_self() {
        let m = vec![0xFFFF_FFFBu32];
        let (k, n_prime) = mont_context(&m);
        let a = vec![777777u32];
        let a_mont = to_mont(&a, &m, k);

        let squared = mon_square(&a_mont, &m, n_prime);
        let via_pro = mon_pro(&a_mont, &a_mont, &m, n_prime);
        assert_eq!(squared, via_pro);
    }

    #[test]
    fn montgomery_roundtrip() {
        let m = vec![0xFFFF_FFFBu32];
        let (k, n_prime) = mont_context(&m);
        let x = vec![42u32];
        let x_mont = to_mont(&x, &m, k);
        let r_squared = to_mont(&limb::get_power_of_two(k), &m, k);
        let back = mon_pro(&mon_pro(&x_mont, &r_squared, &m, n_prime), &[1], &m, n_prime);
        assert_eq!(back, x);
    }
}
