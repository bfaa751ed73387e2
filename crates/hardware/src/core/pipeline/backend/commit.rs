//! Commit Stage: in-order retirement from the ROB head.
//!
//! Retires at most one instruction per cycle. It performs:
//! 1. **Fault Delivery:** A faulted head stops the run with its error.
//! 2. **Gating:** Value producers wait for their register, stores, branches and jumps for completion.
//! 3. **Architectural Update:** Registers and the zero flag are written only here.
//! 4. **Register Reclaim:** The physical register is forwarded to waiters and freed.
//! 5. **Redirects:** A retiring JUMP squashes younger state and restarts fetch at its target.

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::backend::recovery;
use crate::core::pipeline::rob::{RobEntry, RobState};
use crate::core::pipeline::signals::MemOp;

/// Whether the head entry may retire this cycle.
fn can_retire(cpu: &Cpu, head: &RobEntry) -> bool {
    if head.ctrl.commits_on_value() {
        head.dest.is_some_and(|pd| cpu.scoreboard.is_ready(pd))
    } else if head.ctrl.mem == MemOp::Store || head.ctrl.branch || head.ctrl.jump {
        head.state == RobState::Completed
    } else {
        true
    }
}

/// Writes the head's result to architectural state and reclaims its register.
fn writeback(cpu: &mut Cpu, entry: &RobEntry) {
    let Some(pd) = entry.dest else {
        return;
    };
    let val = cpu.scoreboard.value(pd);
    if entry.ctrl.dest.writes_gpr() {
        if let Some(rd) = entry.insn.rd {
            cpu.regs.write(rd, val);
        }
    }
    if entry.ctrl.dest.writes_flag() {
        cpu.regs.set_zero_flag(val);
    }

    cpu.rename_map.retire(pd);
    cpu.iq.capture(pd, val);
    cpu.lsq.capture(pd, val);
    cpu.latches.capture(pd, val);
    cpu.scoreboard.release(pd);
    cpu.free_list.release(pd);
}

/// Executes the Commit stage.
///
/// # Errors
///
/// Returns the fault recorded against the head entry when a faulted
/// instruction reaches it.
pub fn commit_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(head) = cpu.rob.peek_head() else {
        return Ok(());
    };
    if let Some(fault) = &head.fault {
        return Err(fault.clone());
    }

    if head.ctrl.halt {
        let seq = head.seq;
        let ctrl = head.ctrl;
        let _ = cpu.rob.pop_head();
        let _ = recovery::squash_younger(cpu, seq);
        cpu.stats.record_retire(&ctrl);
        cpu.done = true;
        debug!(cycle = cpu.stats.cycles, "halt retired");
        return Ok(());
    }

    if !can_retire(cpu, head) {
        cpu.stats.stalls_commit += 1;
        return Ok(());
    }

    let Some(entry) = cpu.rob.pop_head() else {
        return Ok(());
    };
    trace!(pc = entry.pc, seq = entry.seq.0, insn = %entry.insn, "retire");
    writeback(cpu, &entry);

    if entry.ctrl.jump {
        let squashed = recovery::squash_younger(cpu, entry.seq);
        if let Some(target) = entry.target {
            cpu.pc = target;
        }
        cpu.jump_in_flight = false;
        cpu.stats.flushes += 1;
        debug!(pc = entry.pc, target = cpu.pc, squashed, "jump redirect");
    }

    cpu.stats.record_retire(&entry.ctrl);
    Ok(())
}
