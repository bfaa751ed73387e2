//! Dispatch Stage: all-or-nothing admission into ROB, IQ and LSQ.
//!
//! Every instruction takes a ROB entry. Instructions with a functional unit
//! also take an IQ entry, and memory instructions an LSQ entry. The
//! instruction is admitted only when all of its structures have room;
//! otherwise it waits in the dispatch latch and decode and fetch back up.

use tracing::trace;

use crate::core::Cpu;

/// Executes the Dispatch stage.
pub fn dispatch_stage(cpu: &mut Cpu) {
    let Some(op) = cpu.latches.dispatch.as_ref() else {
        return;
    };
    let ctrl = op.ctrl;

    if cpu.rob.is_full() {
        cpu.stats.stalls_rob += 1;
        return;
    }
    if ctrl.needs_iq() && cpu.iq.is_full() {
        cpu.stats.stalls_iq += 1;
        return;
    }
    if ctrl.needs_lsq() && cpu.lsq.is_full() {
        cpu.stats.stalls_lsq += 1;
        return;
    }

    let Some(op) = cpu.latches.dispatch.take() else {
        return;
    };
    trace!(pc = op.pc, seq = op.seq.0, "dispatch");
    let admitted = cpu.rob.allocate(&op);
    debug_assert!(admitted, "ROB rejected an instruction after the capacity check");
    if ctrl.needs_lsq() {
        let admitted = cpu.lsq.push(op.clone());
        debug_assert!(admitted, "LSQ rejected an instruction after the capacity check");
    }
    if ctrl.needs_iq() {
        let admitted = cpu.iq.insert(op);
        debug_assert!(admitted, "IQ rejected an instruction after the capacity check");
    }
}
