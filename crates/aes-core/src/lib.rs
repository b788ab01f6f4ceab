//! From-scratch AES-128 implementation with CBC and CTR chaining.
//!
//! This crate mirrors the FIPS-197 specification and provides:
//! - Key schedule expansion for AES-128.
//! - Single-block encryption and decryption over the 4x4 state grid.
//! - A chaining driver holding the 16-byte CBC chaining value (which also
//!   serves as the CTR counter).
//!
//! The implementation aims for clarity and testability rather than
//! constant-time guarantees; it should not be treated as side-channel
//! hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cbc;
mod cipher;
mod sbox;
mod schedule;
mod state;

/// AES block of 16 bytes.
pub type Block = [u8; 16];

pub use crate::cbc::CbcState;
pub use crate::cipher::{decrypt_block, encrypt_block};
pub use crate::schedule::{Aes128Key, KeySchedule};
