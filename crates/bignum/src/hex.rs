//! Hexadecimal text conversions for `BigInt` values and raw byte buffers.
//!
//! Decoding comes in two flavors. The lenient functions skip leading
//! whitespace, consume the maximal run of hex digits, and ignore anything
//! after it. The strict variants reject input that is not entirely one hex
//! run.

use std::fmt;

use crate::error::NumError;
use crate::int::BigInt;

fn nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Splits `text` into its leading hex-digit run and the remainder.
fn hex_run(text: &str) -> (&str, &str) {
    let trimmed = text.trim_start();
    let end = trimmed
        .bytes()
        .position(|b| nibble(b).is_none())
        .unwrap_or(trimmed.len());
    trimmed.split_at(end)
}

fn bigint_from_run(run: &str) -> BigInt {
    let digits = run.as_bytes();
    let mut limbs = Vec::with_capacity(digits.len().div_ceil(8));
    // Groups of eight digits, least-significant group first in storage.
    let mut end = digits.len();
    while end > 0 {
        let start = end.saturating_sub(8);
        let mut limb = 0u32;
        for &digit in &digits[start..end] {
            limb = (limb << 4) | u32::from(nibble(digit).unwrap_or(0));
        }
        limbs.push(limb);
        end = start;
    }
    BigInt::from_limbs(limbs)
}

fn bytes_from_run(run: &str) -> Vec<u8> {
    let mut digits = run.as_bytes();
    let mut out = Vec::with_capacity(digits.len().div_ceil(2));
    if digits.len() % 2 == 1 {
        // An odd digit count reads as one implicit leading zero nibble.
        out.push(nibble(digits[0]).unwrap_or(0));
        digits = &digits[1..];
    }
    for pair in digits.chunks_exact(2) {
        out.push((nibble(pair[0]).unwrap_or(0) << 4) | nibble(pair[1]).unwrap_or(0));
    }
    out
}

/// Decodes big-endian hex text into a `BigInt`, leniently.
///
/// An input with no leading hex digits decodes to zero.
pub fn parse_hex(text: &str) -> BigInt {
    let (run, _) = hex_run(text);
    bigint_from_run(run)
}

/// Decodes big-endian hex text into a `BigInt`, rejecting input that is not
/// a single run of hex digits surrounded by optional whitespace.
pub fn parse_hex_strict(text: &str) -> Result<BigInt, NumError> {
    let (run, rest) = hex_run(text);
    if run.is_empty() || !rest.trim_end().is_empty() {
        return Err(NumError::MalformedHex);
    }
    Ok(bigint_from_run(run))
}

/// Decodes hex text into bytes, leniently. An odd number of digits is
/// completed with one implicit leading zero nibble.
pub fn decode_bytes(text: &str) -> Vec<u8> {
    let (run, _) = hex_run(text);
    bytes_from_run(run)
}

/// Strict byte decoding; empty payloads are permitted (they decode to an
/// empty buffer) but trailing non-hex content is not.
pub fn decode_bytes_strict(text: &str) -> Result<Vec<u8>, NumError> {
    let (run, rest) = hex_run(text);
    if !rest.trim_end().is_empty() {
        return Err(NumError::MalformedHex);
    }
    Ok(bytes_from_run(run))
}

impl fmt::UpperHex for BigInt {
    /// Most-significant nibble first, leading zeros stripped, `"0"` for the
    /// value zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut limbs = self.limbs().iter().rev();
        match limbs.next() {
            None => f.write_str("0"),
            Some(top) => {
                write!(f, "{top:X}")?;
                for limb in limbs {
                    write!(f, "{limb:08X}")?;
                }
                Ok(())
            }
        }
    }
}
