//! AES-128 key schedule expansion.

use crate::sbox::SBOX;

/// Round constants, indexed by `word / 4` during expansion. Entry zero is
/// never read; it keeps the indexing aligned with the round number.
const RCON: [u8; 11] = [
    0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1B, 0x36,
];

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

/// Expanded key material: 11 round keys packed into one 176-byte sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySchedule {
    bytes: [u8; 176],
}

impl KeySchedule {
    /// Expands a 128-bit key into the full round-key sequence.
    ///
    /// The first 16 bytes are the key itself; each later 4-byte word is the
    /// previous word (rotated, substituted, and round-constant-mixed every
    /// fourth word) XORed with the word four positions back.
    pub fn expand(key: &Aes128Key) -> Self {
        let mut bytes = [0u8; 176];
        bytes[..16].copy_from_slice(&key.0);
        for word in 4..44 {
            let mut temp = [0u8; 4];
            temp.copy_from_slice(&bytes[(word - 1) * 4..word * 4]);
            if word % 4 == 0 {
                temp.rotate_left(1);
                for byte in temp.iter_mut() {
                    *byte = SBOX[usize::from(*byte)];
                }
                temp[0] ^= RCON[word / 4];
            }
            for (i, t) in temp.iter().enumerate() {
                bytes[word * 4 + i] = bytes[(word - 4) * 4 + i] ^ t;
            }
        }
        KeySchedule { bytes }
    }

    /// Returns the round key for rounds 0 through 10.
    #[inline]
    pub fn round_key(&self, round: usize) -> &[u8; 16] {
        self.bytes[round * 16..(round + 1) * 16]
            .try_into()
            .expect("round key slice is 16 bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    #[test]
    fn round_zero_is_the_key_itself() {
        let schedule = KeySchedule::expand(&Aes128Key(NIST_KEY));
        assert_eq!(schedule.round_key(0), &NIST_KEY);
    }

    #[test]
    fn final_round_key_matches_fips_example() {
        // FIPS-197 Appendix C.1 expansion of 000102...0e0f.
        let schedule = KeySchedule::expand(&Aes128Key(NIST_KEY));
        let expected: [u8; 16] = [
            0x13, 0x11, 0x1d, 0x7f, 0xe3, 0x94, 0x4a, 0x17, 0xf3, 0x07, 0xa7, 0x8b, 0x4d, 0x2b,
            0x30, 0xc5,
        ];
        assert_eq!(schedule.round_key(10), &expected);
    }
}
