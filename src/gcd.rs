//! Binary GCD (component D): greatest common divisor via shifts and
//! subtractions, operating on non-negative magnitudes.

use crate::bigint::BigInt;
use crate::limb;
use std::cmp::Ordering;

/// Binary GCD on normalised, non-negative limb magnitudes.
fn gcd_magnitude(a: &[u32], b: &[u32]) -> Vec<u32> {
    if limb::is_zero(a) {
        return b.to_vec();
    }
    if limb::is_zero(b) {
        return a.to_vec();
    }

    let za = limb::get_lowest_set_bit(a).unwrap();
    let zb = limb::get_lowest_set_bit(b).unwrap();
    let p = za.min(zb);

    let mut op1 = limb::shr(a, za);
    let mut op2 = limb::shr(b, zb);

    if limb::cmp(&op2, &op1) == Ordering::Less {
        std::mem::swap(&mut op1, &mut op2);
    }

    loop {
        if op1.is_empty() {
            break;
        }
        if op2.len() == 1 {
            // single-limb binary GCD: alternate subtract and strip
            // trailing zeros until one operand is zero.
            let mut x = op2[0];
            let mut y = op1[0];
            while y != 0 {
                if x > y {
                    std::mem::swap(&mut x, &mut y);
                }
                y -= x;
                if y == 0 {
                    break;
                }
                y >>= y.trailing_zeros();
            }
            op2 = if x == 0 { Vec::new() } else { vec![x] };
            op1 = Vec::new();
            break;
        } else if op2.len() as f64 > 1.2 * op1.len() as f64 {
            let (_, rem) = crate::div::knuth::divide(&op2, &op1);
            op2 = rem;
            if let Some(tz) = limb::get_lowest_set_bit(&op2) {
                op2 = limb::shr(&op2, tz);
            }
        } else {
            while limb::cmp(&op2, &op1) != Ordering::Less {
                op2 = limb::sub(&op2, &op1);
                if let Some(tz) = limb::get_lowest_set_bit(&op2) {
                    op2 = limb::shr(&op2, tz);
                } else {
                    break; // op2 is zero
                }
            }
        }

        if limb::cmp(&op2, &op1) == Ordering::Less {
            std::mem::swap(&mut op1, &mut op2);
        }
        if limb::is_zero(&op1) {
            break;
        }
    }

    limb::shl(&op2, p)
}

/// `gcdBinary(bi, bi) -> bi`. Both inputs are treated by magnitude; the
/// result is always non-negative.
pub fn gcd_binary(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() {
        return b.abs();
    }
    if b.is_zero() {
        return a.abs();
    }
    let g = gcd_magnitude(a.limbs(), b.limbs());
    BigInt::from_sign_and_limbs(1, g)
}

/// `gcdBinary(int, int) -> int`, the small-operand specialisation that
/// avoids allocating a `BigInt` for values already fitting in a `u64`.
pub fn gcd_binary_u64(mut a: u64, mut b: u64) -> u64 {
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }
    let za = a.trailing_zeros();
    let zb = b.trailing_zeros();
    let p = za.min(zb);
    a >>= za;
    b >>= zb;
    loop {
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        b -= a;
        if b == 0 {
            return a << p;
        }
        b >>= b.trailing_zeros();
    }
}
