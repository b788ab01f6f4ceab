//! Error type shared by the arithmetic and codec operations.

use thiserror::Error;

/// Failures surfaced by strict decoding and modular arithmetic entry points.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum NumError {
    /// Strict-mode hex input was empty or contained non-hex characters.
    #[error("malformed hexadecimal input")]
    MalformedHex,
    /// A modular operation was invoked with a zero modulus.
    #[error("modulus must be nonzero")]
    InvalidModulus,
}
