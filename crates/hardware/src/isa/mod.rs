//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode set, the decoded instruction record, the assembly
//! parser and the disassembler.
//!
//! # Instruction classes
//!
//! * Arithmetic: `ADD`, `SUB`, `MUL`, `DIV`, `ADDL`, `SUBL`, `MOVC`, `CMP`.
//! * Logical: `AND`, `OR`, `XOR`.
//! * Memory: `LOAD`, `LDR`, `STORE`, `STR`.
//! * Control: `BZ`, `BNZ`, `JUMP`, `HALT`, `NOP`.

/// Assembly text to instruction record.
pub mod decode;

/// Instruction formatting for traces and diagnostics.
pub mod disasm;

/// Opcodes, instruction records and programs.
pub mod instruction;

pub use instruction::{Instruction, Opcode, Program};
