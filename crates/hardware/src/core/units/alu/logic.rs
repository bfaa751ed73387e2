//! ALU logical operations.
//!
//! Bitwise AND, OR and XOR on the full 32-bit operands.

use crate::core::pipeline::signals::AluOp;

/// Executes a bitwise operation. Non-logic opcodes yield `0`.
pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        _ => 0,
    }
}
