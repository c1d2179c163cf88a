//! Error kinds surfaced by the division and modular-arithmetic core.
//!
//! Internal invariants (normalisation, array bounds, non-negativity of
//! interim magnitudes) are not represented here: their violation indicates
//! an implementation bug, not a user error, and is reported via
//! `debug_assert!`/`panic!` at the point of violation instead.

use thiserror::Error;

/// Failure modes for the operations exposed by this crate.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BigIntError {
    /// The divisor was zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A modulus was required to be positive but was zero or negative.
    #[error("modulus must be positive")]
    NegativeModulus,
    /// No modular inverse exists for the given operands.
    #[error("value is not invertible modulo the given modulus")]
    NotInvertible,
    /// `modPow` was entered with a negative exponent on a path that has no
    /// inverse to fall back on.
    #[error("negative exponent requires an invertible base")]
    NegativeExponent,
}

pub type Result<T> = core::result::Result<T, BigIntError>;
