//! Arbitrary-precision nonnegative integer arithmetic for the `dhaes`
//! workspace.
//!
//! This crate provides:
//! - A base-2^32 limb-vector integer type with comparison, addition,
//!   subtraction, multiplication, and shift-and-subtract division.
//! - Hexadecimal text conversion in a lenient (reference-compatible) and a
//!   strict flavor.
//! - The iterative extended Euclidean algorithm, modular inversion, and
//!   square-and-multiply modular exponentiation.
//!
//! The implementation aims for clarity and testability rather than speed or
//! constant-time guarantees; operand sizes are bounded only by memory.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod hex;
mod int;
mod modular;

pub use crate::error::NumError;
pub use crate::hex::{decode_bytes, decode_bytes_strict, parse_hex, parse_hex_strict};
pub use crate::int::BigInt;
pub use crate::modular::{extended_gcd, mod_inverse, mod_pow, Coefficient, ExtendedGcd};
