//! Script command parsing.

use crate::error::ProtocolError;

/// One parsed script command.
///
/// Hex payloads stay textual here; they are interpreted at execution time so
/// the session's lenient/strict mode applies uniformly. A command is
/// immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `dh a b g p`: derive the shared secret `g^(a*b) mod p` and establish
    /// the AES session key.
    DeriveKey {
        /// First private exponent, hex.
        a: String,
        /// Second private exponent, hex.
        b: String,
        /// Generator, hex.
        g: String,
        /// Modulus, hex.
        p: String,
    },
    /// `e <hex>`: CBC-encrypt a hex message.
    Encrypt(String),
    /// `d <hex>`: CBC-decrypt a hex ciphertext.
    Decrypt(String),
}

impl Command {
    /// Parses one script line; surrounding whitespace is tolerated.
    pub fn parse(line: &str) -> Result<Command, ProtocolError> {
        let bad = || ProtocolError::BadCommand(line.trim().to_string());
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or_else(bad)?;
        let command = match verb {
            "dh" => Command::DeriveKey {
                a: tokens.next().ok_or_else(bad)?.to_string(),
                b: tokens.next().ok_or_else(bad)?.to_string(),
                g: tokens.next().ok_or_else(bad)?.to_string(),
                p: tokens.next().ok_or_else(bad)?.to_string(),
            },
            "e" => Command::Encrypt(tokens.next().unwrap_or_default().to_string()),
            "d" => Command::Decrypt(tokens.next().unwrap_or_default().to_string()),
            _ => return Err(bad()),
        };
        if tokens.next().is_some() {
            return Err(bad());
        }
        Ok(command)
    }

    /// The script verb, for logging.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::DeriveKey { .. } => "dh",
            Command::Encrypt(_) => "e",
            Command::Decrypt(_) => "d",
        }
    }
}
