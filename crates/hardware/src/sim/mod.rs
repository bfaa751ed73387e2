//! Simulation driver and program loading.
//!
//! Provides the assembly loader and the [`Simulator`] that owns a CPU and
//! steps it cycle by cycle.

/// Assembly source loader.
pub mod loader;

/// Cycle driver owning the CPU.
pub mod simulator;

pub use self::simulator::{RunOutcome, Simulator};
