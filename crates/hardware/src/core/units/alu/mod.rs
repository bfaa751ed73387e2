//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the combinational datapath shared by the integer
//! unit, the logical unit and the first multiplier stage. All arithmetic is
//! 32-bit two's complement and wraps on overflow.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div
//! - [`logic`]:      And, Or, Xor

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor).
pub mod logic;

use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (register value or immediate)
    ///
    /// # Returns
    ///
    /// The result, or `None` for a division by zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use oosim_core::core::units::alu::Alu;
    /// use oosim_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 5, 10), Some(15));
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), Some(i32::MIN));
    /// assert_eq!(Alu::execute(AluOp::Xor, 0b1100, 0b1010), Some(0b0110));
    /// assert_eq!(Alu::execute(AluOp::Div, 7, 0), None);
    /// assert_eq!(Alu::execute(AluOp::PassB, 3, 42), Some(42));
    /// ```
    pub fn execute(op: AluOp, a: i32, b: i32) -> Option<i32> {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Div => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Or | AluOp::Xor => Some(logic::execute(op, a, b)),
            AluOp::PassB => Some(b),
        }
    }
}
