//! Branch Resolution Unit (BRU).
//!
//! This module decides conditional branch outcomes from the zero flag and
//! holds the branch target buffer used by fetch to predict them.

/// Branch Target Buffer for predicted branch outcomes.
pub mod btb;

pub use self::btb::{Btb, BtbPrediction};

use crate::isa::instruction::Opcode;

/// Returns whether a conditional branch is taken for the given zero-flag value.
///
/// `BZ` is taken when the flag is zero, `BNZ` when it is not. Any other opcode
/// is reported not taken.
pub const fn branch_taken(op: Opcode, zero_flag: i32) -> bool {
    match op {
        Opcode::Bz => zero_flag == 0,
        Opcode::Bnz => zero_flag != 0,
        _ => false,
    }
}

/// Target of a pc-relative control transfer.
pub const fn branch_target(pc: u32, imm: i32) -> u32 {
    pc.wrapping_add_signed(imm)
}
