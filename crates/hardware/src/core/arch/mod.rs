//! Architectural state.
//!
//! State visible to the program: the register file with its valid bits and
//! the committed zero flag. It only changes when an instruction retires.

/// Architectural register file and zero flag.
pub mod gpr;

pub use gpr::Gpr;
