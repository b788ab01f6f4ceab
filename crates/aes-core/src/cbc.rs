//! CBC chaining (and the counter-mode transform that shares its state).
//!
//! The chaining value lives for a whole command stream: it is XORed into
//! each plaintext block before encryption, replaced by each ciphertext block
//! after both encryption and decryption, and reset to the zero IV only when
//! the owning session decides to. Counter mode reuses the same 16-byte state
//! as its counter.

use crate::cipher::{decrypt_block, encrypt_block};
use crate::schedule::KeySchedule;
use crate::Block;

/// Chaining state for CBC (and CTR) processing under one key schedule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CbcState {
    chain: Block,
}

impl CbcState {
    /// Fresh state with a zero chaining value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the chaining value to the zero IV.
    pub fn reset(&mut self) {
        self.chain = [0u8; 16];
    }

    /// Current chaining value.
    pub fn chain(&self) -> &Block {
        &self.chain
    }

    /// Encrypts one block: `cipher = AES(plain XOR chain)`, then the
    /// ciphertext becomes the next chaining value.
    pub fn encrypt_block(&mut self, schedule: &KeySchedule, plain: &Block) -> Block {
        let mut input = *plain;
        xor_block(&mut input, &self.chain);
        let cipher = encrypt_block(&input, schedule);
        self.chain = cipher;
        cipher
    }

    /// Decrypts one block: `plain = AES⁻¹(cipher) XOR chain`. The ciphertext
    /// becomes the next chaining value unconditionally.
    pub fn decrypt_block(&mut self, schedule: &KeySchedule, cipher: &Block) -> Block {
        let mut plain = decrypt_block(cipher, schedule);
        xor_block(&mut plain, &self.chain);
        self.chain = *cipher;
        plain
    }

    /// Encrypts a buffer in place, block by block in order.
    ///
    /// The buffer length must already be a multiple of 16; callers pad.
    pub fn encrypt_in_place(&mut self, schedule: &KeySchedule, data: &mut [u8]) {
        debug_assert_eq!(data.len() % 16, 0, "caller pads to whole blocks");
        for chunk in data.chunks_exact_mut(16) {
            let block: Block = chunk.try_into().expect("chunk is 16 bytes");
            chunk.copy_from_slice(&self.encrypt_block(schedule, &block));
        }
    }

    /// Decrypts a buffer in place, block by block in order.
    pub fn decrypt_in_place(&mut self, schedule: &KeySchedule, data: &mut [u8]) {
        debug_assert_eq!(data.len() % 16, 0, "caller pads to whole blocks");
        for chunk in data.chunks_exact_mut(16) {
            let block: Block = chunk.try_into().expect("chunk is 16 bytes");
            chunk.copy_from_slice(&self.decrypt_block(schedule, &block));
        }
    }

    /// Counter-mode transform: `out = AES(counter) XOR in` per block, with a
    /// big-endian increment of the counter after each block. Encryption and
    /// decryption are the same operation. The chaining value doubles as the
    /// counter.
    pub fn apply_ctr(&mut self, schedule: &KeySchedule, data: &mut [u8]) {
        debug_assert_eq!(data.len() % 16, 0, "caller pads to whole blocks");
        for chunk in data.chunks_exact_mut(16) {
            let keystream = encrypt_block(&self.chain, schedule);
            for (byte, pad) in chunk.iter_mut().zip(keystream.iter()) {
                *byte ^= pad;
            }
            increment_counter(&mut self.chain);
        }
    }
}

fn xor_block(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Big-endian increment: the last byte is least significant.
fn increment_counter(counter: &mut Block) {
    for byte in counter.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}
