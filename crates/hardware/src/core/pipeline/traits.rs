//! Pipeline observation interface.
//!
//! This module defines the hook through which a front end watches the pipeline. It provides:
//! 1. **Stage Names:** One variant per stage that can hold an instruction.
//! 2. **Trace Sink:** A per-cycle callback invoked for every occupied stage.
//!
//! Sinks only observe; nothing they do can change simulation state.

use std::fmt;

use crate::isa::instruction::Instruction;

/// A pipeline stage that can hold an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Instruction at the fetch pc.
    Fetch,
    /// Fetched instruction awaiting rename.
    DecodeRename,
    /// Renamed instruction awaiting admission.
    Dispatch,
    /// Waiting in the issue queue.
    IssueQueue,
    /// Waiting in the load-store queue.
    Lsq,
    /// Integer/AGEN unit.
    IntFu,
    /// Logical unit.
    LogicalFu,
    /// Multiplier stage (1 to 4).
    Mul(u8),
    /// Data cache.
    DCache,
    /// Head of the reorder buffer.
    RobHead,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => f.write_str("Fetch"),
            Self::DecodeRename => f.write_str("Decode/Rename"),
            Self::Dispatch => f.write_str("Dispatch"),
            Self::IssueQueue => f.write_str("IQ"),
            Self::Lsq => f.write_str("LSQ"),
            Self::IntFu => f.write_str("IntFU"),
            Self::LogicalFu => f.write_str("LogicalFU"),
            Self::Mul(n) => write!(f, "Mul{n}"),
            Self::DCache => f.write_str("DCache"),
            Self::RobHead => f.write_str("ROB"),
        }
    }
}

/// Receives a record per occupied stage at the start of every cycle.
pub trait TraceSink {
    /// Called once per occupied stage.
    ///
    /// # Arguments
    ///
    /// * `cycle` - Cycle about to execute, starting at 1.
    /// * `stage` - Stage holding the instruction.
    /// * `pc` - Address of the instruction.
    /// * `insn` - The decoded instruction.
    fn on_stage(&mut self, cycle: u64, stage: Stage, pc: u32, insn: &Instruction);
}

/// Sink that forwards every record to `tracing` at trace level.
#[derive(Debug, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn on_stage(&mut self, cycle: u64, stage: Stage, pc: u32, insn: &Instruction) {
        tracing::trace!(cycle, %stage, pc, insn = %insn);
    }
}
