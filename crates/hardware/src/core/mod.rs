//! Core processor implementation.
//!
//! This module contains the out-of-order core: committed architectural state,
//! the pipeline structures and stages, and the execution units they drive.

/// Architectural state (general-purpose registers and zero flag).
pub mod arch;

/// CPU state container and data memory.
pub mod cpu;

/// Out-of-order pipeline (renaming, ROB, IQ, LSQ, stages, engine).
pub mod pipeline;

/// Execution units (ALU, branch resolution and BTB).
pub mod units;

pub use self::cpu::Cpu;
