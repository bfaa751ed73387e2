//! Simulation driver tests.

/// Program loading from text and files.
pub mod loader;
