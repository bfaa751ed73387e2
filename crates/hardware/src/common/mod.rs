//! Common types and constants shared by every pipeline component.
//!
//! This module provides the small building blocks the rest of the simulator is
//! written in terms of. It includes:
//! 1. **Constants:** Machine geometry (register counts, code base, memory size).
//! 2. **Register Identifiers:** Strong types for architectural and physical registers.
//! 3. **Error Handling:** The simulator, program and configuration error types.

/// Machine-wide constants.
pub mod constants;

/// Error types surfaced by the simulator.
pub mod error;

/// Architectural/physical register identifiers and sequence numbers.
pub mod reg;

pub use error::{ConfigError, ProgramError, SimError};
pub use reg::{ArchReg, PhysReg, SeqNum};
