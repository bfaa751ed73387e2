//! Issue Stage: selects ready instructions into the functional units.
//!
//! One instruction per unit class per cycle. Selection scans the issue queue in
//! storage order, which is dispatch order, and takes the first entry whose
//! issue operands are ready.

use tracing::{trace, warn};

use crate::core::Cpu;
use crate::core::pipeline::signals::FuncUnit;

/// Executes the Issue stage.
pub fn issue_stage(cpu: &mut Cpu) {
    for op in cpu.iq.purge_unissuable() {
        warn!(pc = op.pc, insn = %op.insn, "purged instruction with no functional unit");
    }

    for unit in FuncUnit::ALL {
        let slot = match unit {
            FuncUnit::Integer => &mut cpu.latches.int_fu,
            FuncUnit::Logical => &mut cpu.latches.logical_fu,
            FuncUnit::Multiplier => &mut cpu.latches.mul[0],
        };
        if slot.is_some() {
            continue;
        }
        if let Some(op) = cpu.iq.select(unit, &cpu.scoreboard) {
            trace!(pc = op.pc, seq = op.seq.0, ?unit, "issue");
            *slot = Some(op);
        }
    }
}
