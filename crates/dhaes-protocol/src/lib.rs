//! The scripted protocol driving Diffie–Hellman key derivation and
//! AES-128-CBC encryption.
//!
//! A script opens with an operation count and continues with one command per
//! line: `dh a b g p` derives a shared secret and establishes the session
//! key, `e <hex>` encrypts, `d <hex>` decrypts. Execution is strictly
//! sequential; all cipher state lives in an explicit [`Session`] rather than
//! in globals, so independent sessions can run side by side in tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod error;
mod script;
mod session;

pub use crate::command::Command;
pub use crate::error::ProtocolError;
pub use crate::script::run_script;
pub use crate::session::{HexMode, Session};
