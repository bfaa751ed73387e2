//! Unit tests for the instruction set front end.
//!
//! This module aggregates tests for:
//! - Assembly decoding and operand validation.
//! - Disassembler formatting.


/// Disassembly formatting tests.
pub mod disasm;
