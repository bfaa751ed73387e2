//! Out-of-order pipeline simulator library.
//!
//! This crate implements a cycle-level simulator of an out-of-order core for a
//! small 32-bit register ISA with the following:
//! 1. **Core:** Register renaming, reorder buffer, issue queue, load-store queue and BTB.
//! 2. **Units:** Integer/AGEN, logical, a four-stage pipelined multiplier and a data cache.
//! 3. **ISA:** Opcode set, assembly decoder and disassembler.
//! 4. **Simulation:** Loader, driver, configuration and statistics collection.

/// Common types and constants (registers, sequence numbers, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (opcodes, decoder, disassembler).
pub mod isa;
/// Program loader and simulation driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds architectural state, pipeline structures and stats.
pub use crate::core::Cpu;
/// Cycle driver; construct with `Simulator::new` or `Simulator::from_source`.
pub use crate::sim::Simulator;
