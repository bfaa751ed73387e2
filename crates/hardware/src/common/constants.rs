//! Global Machine Constants.
//!
//! This module defines the fixed geometry of the modelled machine. It includes:
//! 1. **Register Constants:** Architectural register count and the zero-flag reset value.
//! 2. **Instruction Constants:** Code base address and instruction width.
//! 3. **Execution Constants:** Multiplier depth.

/// Number of architectural general-purpose registers (`R0`..`R15`).
pub const NUM_ARCH_REGS: usize = 16;

/// Address of the first instruction of every program.
pub const CODE_BASE: u32 = 4000;

/// Size of one instruction in bytes; the program counter advances by this amount.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Value the architectural zero flag holds before any compare retires.
///
/// Any nonzero value works; this one makes an untouched flag easy to spot in dumps.
pub const ZERO_FLAG_RESET: i32 = -9999;

/// Number of stages in the pipelined multiplier.
pub const MUL_STAGES: usize = 4;
