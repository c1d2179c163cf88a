//! Burnikel-Ziegler recursive division: asymptotically faster than
//! schoolbook division for large operands, recursing down into
//! [`super::knuth`] once block sizes fall under the threshold.

use super::knuth;
use crate::limb;
use std::cmp::Ordering;

/// Below this many limbs in the divisor, fall back to schoolbook division.
pub const WHEN_BURNIKEL_ZIEGLER: usize = 80;

/// `2^(32n) - 1`: `n` limbs, all bits set.
fn ones(n: usize) -> Vec<u32> {
    vec![u32::MAX; n]
}

/// `hi * 2^(32*shift_limbs) + lo`, where `lo` is assumed to already fit in
/// `shift_limbs` limbs.
fn combine(hi: &[u32], lo: &[u32], shift_limbs: usize) -> Vec<u32> {
    debug_assert!(lo.len() <= shift_limbs);
    let mut out = vec![0u32; shift_limbs + hi.len()];
    out[..lo.len()].copy_from_slice(lo);
    out[shift_limbs..shift_limbs + hi.len()].copy_from_slice(hi);
    limb::trim(&mut out);
    out
}

/// Top `count` limbs of `limbs` treated as padded with zeros beyond its
/// actual length, i.e. `limbs >> (32 * (limbs.len() - count))` truncated —
/// used to pull out a high-order chunk of a possibly shorter-than-expected
/// block.
fn top_limbs(limbs: &[u32], skip: usize) -> Vec<u32> {
    if skip >= limbs.len() {
        Vec::new()
    } else {
        let mut v = limbs[skip..].to_vec();
        limb::trim(&mut v);
        v
    }
}

fn low_limbs(limbs: &[u32], count: usize) -> Vec<u32> {
    let end = count.min(limbs.len());
    let mut v = limbs[..end].to_vec();
    limb::trim(&mut v);
    v
}

/// A value that may be negative mid-computation, used only inside
/// `divide3n2n`'s correction loop: the "r < 0" check is the key BZ
/// invariant and must stay a real signed quantity, not be approximated.
struct Signed {
    negative: bool,
    magnitude: Vec<u32>,
}

impl Signed {
    fn from_unsigned(v: Vec<u32>) -> Self {
        Self { negative: false, magnitude: v }
    }

    fn is_negative(&self) -> bool {
        self.negative && !limb::is_zero(&self.magnitude)
    }

    fn add_unsigned(&mut self, rhs: &[u32]) {
        if self.negative {
            match limb::cmp(&self.magnitude, rhs) {
                Ordering::Greater => self.magnitude = limb::sub(&self.magnitude, rhs),
                Ordering::Equal => {
                    self.magnitude = Vec::new();
                    self.negative = false;
                }
                Ordering::Less => {
                    self.magnitude = limb::sub(rhs, &self.magnitude);
                    self.negative = false;
                }
            }
        } else {
            self.magnitude = limb::add(&self.magnitude, rhs);
        }
    }

    fn sub_unsigned(&mut self, rhs: &[u32]) {
        if self.negative {
            self.magnitude = limb::add(&self.magnitude, rhs);
        } else {
            match limb::cmp(&self.magnitude, rhs) {
                Ordering::Less => {
                    self.magnitude = limb::sub(rhs, &self.magnitude);
                    self.negative = true;
                }
                _ => self.magnitude = limb::sub(&self.magnitude, rhs),
            }
        }
    }

    fn into_nonnegative(self) -> Vec<u32> {
        debug_assert!(!self.is_negative());
        self.magnitude
    }
}

/// `divide3n2n(a, b, n)`: `a` has at most `3n/2` limbs, `b` has `n` limbs
/// split into an upper half `b1` and lower half `b2` of `n/2` limbs each.
fn divide3n2n(a: &[u32], b: &[u32], n: usize) -> (Vec<u32>, Vec<u32>) {
    let h = n / 2;
    let b1 = top_limbs(b, h);
    let b2 = low_limbs(b, h);

    let a_top_2h = top_limbs(a, h); // a >> 32h, up to 2h limbs
    let a_low_h = low_limbs(a, h); // lowest h limbs
    let a_high_h = top_limbs(a, 2 * h); // a >> 32*2h, up to h limbs

    let (q, mut r1) = if limb::cmp(&a_high_h, &b1) == Ordering::Less {
        divide2n1n(&a_top_2h, &b1, h)
    } else {
        let q = ones(h);
        // r1 = a_top_2h - b1 * 2^(32h) + b1
        let mut r1 = Signed::from_unsigned(a_top_2h);
        r1.sub_unsigned(&combine(&b1, &[], h));
        r1.add_unsigned(&b1);
        (q, r1.into_nonnegative())
    };
    limb::trim(&mut r1);

    // r = r1 * 2^(32h) + a_low_h - q*b2
    let mut r = Signed::from_unsigned(combine(&r1, &a_low_h, h));
    r.sub_unsigned(&limb::mul(&q, &b2));

    let mut q = q;
    // at most two corrections, per the BZ invariant
    while r.is_negative() {
        r.add_unsigned(b);
        limb::trim(&mut q);
        q = limb::sub(&q, &[1]);
    }
    (q, r.into_nonnegative())
}

/// `divide2n1n(a, b, n)`: dividend has at most `2n` limbs, divisor has
/// exactly `n` limbs. Falls back to Knuth D once `n` drops below the
/// threshold or is odd (the base cases [`divide3n2n`] needs an even split
/// to halve).
fn divide2n1n(a: &[u32], b: &[u32], n: usize) -> (Vec<u32>, Vec<u32>) {
    if n < WHEN_BURNIKEL_ZIEGLER || n % 2 != 0 {
        return knuth::divide(a, b);
    }
    let h = n / 2;

    let a_top_2h = top_limbs(a, h); // upper 3 quarters: a1 a2 a3 (combined), up to 3h limbs... see below
    let a_low_h = low_limbs(a, h); // a4

    let (q1, r1) = divide3n2n(&a_top_2h, b, n);
    let combined = combine(&r1, &a_low_h, h);
    let (q2, r2) = divide3n2n(&combined, b, n);

    let q = combine(&q1, &q2, h);
    (q, r2)
}

/// Full Burnikel-Ziegler division, dispatched to from [`super::divide`]
/// once the divisor is at least [`WHEN_BURNIKEL_ZIEGLER`] limbs long.
pub fn divide(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    debug_assert!(!limb::is_zero(b), "division by zero");
    if limb::cmp(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }

    let s = b.len();
    let t_threshold = WHEN_BURNIKEL_ZIEGLER;
    let q = (s / t_threshold).max(1);
    let m = 1usize << (32 - (q as u32).leading_zeros());
    let j = (s + m - 1) / m;
    let n = j * m;

    let sigma = (32 * n as u64).saturating_sub(limb::bit_length(b));
    let b_shifted = limb::shl(b, sigma);
    let a_shifted = limb::shl(a, sigma);

    let mut t = ((limb::bit_length(&a_shifted) + 32 * n as u64) / (32 * n as u64)) as usize;
    if t < 2 {
        t = 2;
    }

    let block = |i: usize| -> Vec<u32> { limb::get_block(&a_shifted, i, t, n) };

    let mut z = combine(&block(t - 1), &block(t - 2), n);
    let mut quot_acc: Vec<u32> = Vec::new();

    for i in (1..=t.saturating_sub(2)).rev() {
        let (qi, ri) = divide2n1n(&z, &b_shifted, n);
        quot_acc = combine(&quot_acc, &qi, n);
        z = combine(&ri, &block(i - 1), n);
    }

    let (q_last, r_final) = divide2n1n(&z, &b_shifted, n);
    quot_acc = combine(&quot_acc, &q_last, n);

    let mut remainder = limb::shr(&r_final, sigma);
    limb::trim(&mut quot_acc);
    limb::trim(&mut remainder);
    (quot_acc, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::div::knuth;

    fn rand_limbs(seed: &mut u64, len: usize) -> Vec<u32> {
        let mut v = Vec::with_capacity(len);
        for _ in 0..len {
            *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            v.push((*seed >> 33) as u32);
        }
        limb::trim(&mut v);
        v
    }

    #[test]
    fn bz_matches_schoolbook_for_large_operands() {
        let mut seed = 0x1234_5678_9abc_def0u64;
        for _ in 0..20 {
            let a = rand_limbs(&mut seed, 400);
            let mut b = rand_limbs(&mut seed, 200);
            if limb::is_zero(&b) {
                b = vec![1];
            }
            let (q_bz, r_bz) = divide(&a, &b);
            let (q_k, r_k) = knuth::divide(&a, &b);
            assert_eq!(q_bz, q_k);
            assert_eq!(r_bz, r_k);
            assert_eq!(limb::cmp(&r_bz, &b), Ordering::Less);
        }
    }

    #[test]
    fn ones_is_all_bits_set() {
        assert_eq!(ones(2), vec![u32::MAX, u32::MAX]);
    }
}
