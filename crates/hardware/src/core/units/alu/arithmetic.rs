//! ALU arithmetic operations.
//!
//! Implements 32-bit addition, subtraction, multiplication and division.
//! Overflow wraps; `i32::MIN / -1` wraps to `i32::MIN`.

use crate::core::pipeline::signals::AluOp;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The wrapped result, `None` for a zero divisor. Non-arithmetic opcodes yield `Some(0)`.
pub const fn execute(op: AluOp, a: i32, b: i32) -> Option<i32> {
    match op {
        AluOp::Add => Some(a.wrapping_add(b)),
        AluOp::Sub => Some(a.wrapping_sub(b)),
        AluOp::Mul => Some(a.wrapping_mul(b)),
        AluOp::Div => {
            if b == 0 {
                None
            } else {
                Some(a.wrapping_div(b))
            }
        }
        _ => Some(0),
    }
}
