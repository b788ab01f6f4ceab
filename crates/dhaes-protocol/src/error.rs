//! Protocol-level error type.

use bignum::NumError;
use thiserror::Error;

/// Failures while parsing or executing a command script.
///
/// A script run has no partial-failure recovery: the first error aborts the
/// whole run.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// `e` or `d` was issued before any `dh` established a key.
    #[error("no key established: run a dh command first")]
    KeyNotEstablished,
    /// A line does not match `dh a b g p`, `e <hex>`, or `d <hex>`.
    #[error("malformed command line: {0:?}")]
    BadCommand(String),
    /// The first script line is not an operation count.
    #[error("invalid operation count: {0:?}")]
    BadCount(String),
    /// Hex decoding or modular arithmetic failure.
    #[error(transparent)]
    Num(#[from] NumError),
}
