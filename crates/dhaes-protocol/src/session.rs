//! Session state machine: key establishment and the CBC cipher commands.

use aes_core::{Aes128Key, CbcState, KeySchedule};
use bignum::{decode_bytes, decode_bytes_strict, mod_pow, parse_hex, parse_hex_strict, BigInt};
use tracing::debug;

use crate::command::Command;
use crate::error::ProtocolError;

/// Hex decoding behavior for command payloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HexMode {
    /// Take the leading hex run and ignore anything after it.
    #[default]
    Lenient,
    /// Reject payloads that are not entirely hex.
    Strict,
}

/// The mutable cipher context for one sequential command stream.
///
/// Owns the expanded key schedule and the CBC chaining value. Both live for
/// the whole script run and are replaced wholesale by each `dh` command; the
/// chaining value additionally changes with every processed block. A session
/// must only ever see one command at a time.
pub struct Session {
    mode: HexMode,
    schedule: Option<KeySchedule>,
    cbc: CbcState,
}

impl Session {
    /// Fresh session with no key established.
    pub fn new(mode: HexMode) -> Self {
        Session {
            mode,
            schedule: None,
            cbc: CbcState::new(),
        }
    }

    /// True once a `dh` command has established a key.
    pub fn key_established(&self) -> bool {
        self.schedule.is_some()
    }

    /// Executes one command, returning its output line.
    pub fn execute(&mut self, command: &Command) -> Result<String, ProtocolError> {
        match command {
            Command::DeriveKey { a, b, g, p } => self.derive_key(a, b, g, p),
            Command::Encrypt(payload) => self.encrypt(payload),
            Command::Decrypt(payload) => self.decrypt(payload),
        }
    }

    fn derive_key(&mut self, a: &str, b: &str, g: &str, p: &str) -> Result<String, ProtocolError> {
        let a = parse_operand(self.mode, a)?;
        let b = parse_operand(self.mode, b)?;
        let g = parse_operand(self.mode, g)?;
        let p = parse_operand(self.mode, p)?;

        // Simulated exchange: both private exponents are known locally, so
        // the shared secret is computed in one step as g^(a*b) mod p.
        let secret = mod_pow(&g, &a.mul(&b), &p)?;
        let rendered = format!("{secret:X}");
        // The reported value is the low 32 hex digits of the rendering; a
        // string suffix, so zeros inside those digits survive.
        let display = &rendered[rendered.len().saturating_sub(32)..];

        // AES key = the same low 128 bits, zero-extended on the left.
        let mut key = [0u8; 16];
        key.copy_from_slice(&decode_bytes(&format!("{display:0>32}")));
        self.schedule = Some(KeySchedule::expand(&Aes128Key(key)));
        self.cbc.reset();
        debug!(secret_bits = secret.bit_len(), "session key established");
        Ok(format!("s={display}"))
    }

    fn encrypt(&mut self, payload: &str) -> Result<String, ProtocolError> {
        let Session { mode, schedule, cbc } = self;
        let schedule = schedule.as_ref().ok_or(ProtocolError::KeyNotEstablished)?;
        let mut data = decode_payload(*mode, payload)?;
        let message_len = data.len();
        // Every encryption restarts from the zero IV (decryption does not);
        // consecutive `e` commands are therefore deterministic.
        cbc.reset();
        pad_to_blocks(&mut data);
        cbc.encrypt_in_place(schedule, &mut data);
        // Only the pre-padding length worth of ciphertext is reported.
        data.truncate(message_len);
        Ok(format!("c={}", hex::encode_upper(&data)))
    }

    fn decrypt(&mut self, payload: &str) -> Result<String, ProtocolError> {
        let Session { mode, schedule, cbc } = self;
        let schedule = schedule.as_ref().ok_or(ProtocolError::KeyNotEstablished)?;
        let mut data = decode_payload(*mode, payload)?;
        pad_to_blocks(&mut data);
        cbc.decrypt_in_place(schedule, &mut data);
        // The full padded length is reported, trailing zero bytes included.
        Ok(format!("m={}", hex::encode_upper(&data)))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(HexMode::Lenient)
    }
}

fn parse_operand(mode: HexMode, text: &str) -> Result<BigInt, ProtocolError> {
    match mode {
        HexMode::Lenient => Ok(parse_hex(text)),
        HexMode::Strict => Ok(parse_hex_strict(text)?),
    }
}

fn decode_payload(mode: HexMode, text: &str) -> Result<Vec<u8>, ProtocolError> {
    match mode {
        HexMode::Lenient => Ok(decode_bytes(text)),
        HexMode::Strict => Ok(decode_bytes_strict(text)?),
    }
}

fn pad_to_blocks(data: &mut Vec<u8>) {
    let tail = data.len() % 16;
    if tail != 0 {
        data.resize(data.len() + (16 - tail), 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes_core::{decrypt_block, encrypt_block};
    use bignum::NumError;

    /// `dh 03 05 02 FFFFFFFFFFFFFFFF` yields the secret 2^15 = 0x8000, so
    /// the derived key is 0x8000 zero-extended on the left.
    const WIDE_DH: &str = "FFFFFFFFFFFFFFFF";

    fn wide_key_schedule() -> KeySchedule {
        let mut key = [0u8; 16];
        key[14] = 0x80;
        KeySchedule::expand(&Aes128Key(key))
    }

    fn dh(session: &mut Session, p: &str) -> String {
        session
            .execute(&Command::DeriveKey {
                a: "03".into(),
                b: "05".into(),
                g: "02".into(),
                p: p.into(),
            })
            .unwrap()
    }

    #[test]
    fn dh_textbook_scenario() {
        // 2^(3*5) mod 11 = 10.
        let mut session = Session::default();
        assert_eq!(dh(&mut session, "0B"), "s=A");
        assert!(session.key_established());
    }

    #[test]
    fn dh_reports_low_bits_of_wide_secret() {
        let mut session = Session::default();
        assert_eq!(dh(&mut session, WIDE_DH), "s=8000");
    }

    #[test]
    fn dh_with_zero_modulus_is_fatal() {
        let mut session = Session::default();
        let err = session.execute(&Command::DeriveKey {
            a: "03".into(),
            b: "05".into(),
            g: "02".into(),
            p: "0".into(),
        });
        assert_eq!(err, Err(ProtocolError::Num(NumError::InvalidModulus)));
    }

    #[test]
    fn cipher_commands_require_a_key() {
        let mut session = Session::default();
        let encrypt = session.execute(&Command::Encrypt("AA".into()));
        assert_eq!(encrypt, Err(ProtocolError::KeyNotEstablished));
        let decrypt = session.execute(&Command::Decrypt("AA".into()));
        assert_eq!(decrypt, Err(ProtocolError::KeyNotEstablished));
    }

    #[test]
    fn single_block_encrypt_uses_zero_iv() {
        let mut session = Session::default();
        dh(&mut session, WIDE_DH);
        let plain = "00112233445566778899AABBCCDDEEFF";
        let output = session.execute(&Command::Encrypt(plain.into())).unwrap();

        let block = bignum::decode_bytes(plain);
        let expected = encrypt_block(
            &block.try_into().expect("one full block"),
            &wide_key_schedule(),
        );
        assert_eq!(output, format!("c={}", hex::encode_upper(expected)));
    }

    #[test]
    fn repeated_encrypt_is_deterministic() {
        let mut session = Session::default();
        dh(&mut session, WIDE_DH);
        let first = session
            .execute(&Command::Encrypt("DEADBEEF".into()))
            .unwrap();
        let second = session
            .execute(&Command::Encrypt("DEADBEEF".into()))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn encrypt_reports_only_the_original_length() {
        let mut session = Session::default();
        dh(&mut session, WIDE_DH);
        let output = session.execute(&Command::Encrypt("AABB".into())).unwrap();
        // "c=" plus two bytes of ciphertext, though a whole block was computed.
        assert_eq!(output.len(), 2 + 4);
    }

    #[test]
    fn odd_digit_messages_take_a_leading_zero_nibble() {
        let mut odd = Session::default();
        dh(&mut odd, WIDE_DH);
        let from_odd = odd.execute(&Command::Encrypt("ABC".into())).unwrap();

        let mut even = Session::default();
        dh(&mut even, WIDE_DH);
        let from_even = even.execute(&Command::Encrypt("0ABC".into())).unwrap();
        assert_eq!(from_odd, from_even);
    }

    #[test]
    fn decrypt_after_dh_uses_zero_iv() {
        let mut enc = Session::default();
        dh(&mut enc, WIDE_DH);
        let plain = "00112233445566778899AABBCCDDEEFF";
        let cipher_line = enc.execute(&Command::Encrypt(plain.into())).unwrap();
        let cipher_hex = cipher_line.strip_prefix("c=").unwrap().to_string();

        let mut dec = Session::default();
        dh(&mut dec, WIDE_DH);
        let plain_line = dec.execute(&Command::Decrypt(cipher_hex)).unwrap();
        assert_eq!(plain_line, format!("m={plain}"));
    }

    #[test]
    fn decrypt_continues_from_prior_chaining_value() {
        let mut session = Session::default();
        dh(&mut session, WIDE_DH);
        let plain = "00112233445566778899AABBCCDDEEFF";
        let cipher_line = session.execute(&Command::Encrypt(plain.into())).unwrap();
        let c1: [u8; 16] = bignum::decode_bytes(cipher_line.strip_prefix("c=").unwrap())
            .try_into()
            .expect("one full block");

        // The later `d` must chain from c1, not from the zero IV.
        let foreign = "000102030405060708090A0B0C0D0E0F";
        let output = session.execute(&Command::Decrypt(foreign.into())).unwrap();

        let schedule = wide_key_schedule();
        let foreign_block: [u8; 16] = bignum::decode_bytes(foreign).try_into().unwrap();
        let mut expected = decrypt_block(&foreign_block, &schedule);
        for (byte, prev) in expected.iter_mut().zip(c1.iter()) {
            *byte ^= prev;
        }
        assert_eq!(output, format!("m={}", hex::encode_upper(expected)));
    }

    #[test]
    fn decrypt_reports_full_padded_length() {
        let mut session = Session::default();
        dh(&mut session, WIDE_DH);
        let output = session.execute(&Command::Decrypt("AABB".into())).unwrap();
        // "m=" plus one whole padded block.
        assert_eq!(output.len(), 2 + 32);
    }

    #[test]
    fn empty_payloads_produce_empty_outputs() {
        let mut session = Session::default();
        dh(&mut session, WIDE_DH);
        assert_eq!(
            session.execute(&Command::Encrypt(String::new())).unwrap(),
            "c="
        );
        assert_eq!(
            session.execute(&Command::Decrypt(String::new())).unwrap(),
            "m="
        );
    }

    #[test]
    fn strict_mode_rejects_junk_payloads() {
        let mut session = Session::new(HexMode::Strict);
        dh(&mut session, WIDE_DH);
        let err = session.execute(&Command::Encrypt("12zz".into()));
        assert_eq!(err, Err(ProtocolError::Num(NumError::MalformedHex)));
    }

    #[test]
    fn lenient_mode_ignores_trailing_junk() {
        let mut with_junk = Session::default();
        dh(&mut with_junk, WIDE_DH);
        let from_junk = with_junk
            .execute(&Command::Encrypt("AABBzz99".into()))
            .unwrap();

        let mut clean = Session::default();
        dh(&mut clean, WIDE_DH);
        let from_clean = clean.execute(&Command::Encrypt("AABB".into())).unwrap();
        assert_eq!(from_junk, from_clean);
    }

    #[test]
    fn dh_resets_the_chaining_value() {
        let mut session = Session::default();
        dh(&mut session, WIDE_DH);
        // Disturb the chain, then re-establish the same key.
        session
            .execute(&Command::Decrypt("99887766554433221100FFEEDDCCBBAA".into()))
            .unwrap();
        dh(&mut session, WIDE_DH);

        // A fresh session with the same key must now agree on decryption.
        let mut fresh = Session::default();
        dh(&mut fresh, WIDE_DH);
        let payload = "00112233445566778899AABBCCDDEEFF";
        assert_eq!(
            session.execute(&Command::Decrypt(payload.into())).unwrap(),
            fresh.execute(&Command::Decrypt(payload.into())).unwrap()
        );
    }
}
