//! Single-block AES-128 encryption and decryption.

use crate::schedule::KeySchedule;
use crate::state::State;
use crate::Block;

/// Encrypts one 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    let mut state = State::from_block(block);

    state.add_round_key(schedule.round_key(0));
    for round in 1..10 {
        state.sub_bytes();
        state.shift_rows();
        state.mix_columns();
        state.add_round_key(schedule.round_key(round));
    }
    // The final round omits MixColumns.
    state.sub_bytes();
    state.shift_rows();
    state.add_round_key(schedule.round_key(10));

    state.into_block()
}

/// Decrypts one 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    let mut state = State::from_block(block);

    state.add_round_key(schedule.round_key(10));
    for round in (1..10).rev() {
        state.inv_shift_rows();
        state.inv_sub_bytes();
        state.add_round_key(schedule.round_key(round));
        state.inv_mix_columns();
    }
    state.inv_shift_rows();
    state.inv_sub_bytes();
    state.add_round_key(schedule.round_key(0));

    state.into_block()
}
