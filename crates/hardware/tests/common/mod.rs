//! Shared test infrastructure.

/// Simulator test harness.
pub mod harness;

/// Sequential golden model.
pub mod reference;
