//! Memory Stages: load-store queue head and data cache.
//!
//! Memory is accessed strictly in program order. Only the LSQ head may move to
//! the data cache, and a store leaves only once it is also the ROB head, so no
//! speculative store ever reaches memory. A store marks its word not ready
//! when it leaves the LSQ and ready again when the data cache writes it; a
//! load waits for its word to be ready. There is no store-to-load bypass.

use tracing::{trace, warn};

use crate::core::Cpu;
use crate::core::pipeline::lsq::LsqAddress;
use crate::core::pipeline::signals::MemOp;

/// Moves the LSQ head into the data cache latch when it may proceed.
pub fn lsq_stage(cpu: &mut Cpu) {
    if cpu.latches.dcache.is_some() {
        return;
    }
    let Some(head) = cpu.lsq.head() else {
        return;
    };

    let idx = match head.addr {
        LsqAddress::Pending => return,
        LsqAddress::Faulted => {
            if let Some(entry) = cpu.lsq.pop_head() {
                // Dependents must still drain; the fault stops the run at commit.
                if let Some(pd) = entry.op.dest {
                    cpu.scoreboard.publish(pd, 0);
                }
            }
            return;
        }
        LsqAddress::Ready(idx) => idx,
    };

    match head.op.ctrl.mem {
        MemOp::Load => {
            if !cpu.memory.is_ready(idx) {
                return;
            }
        }
        MemOp::Store => {
            let data_ready = head
                .op
                .src1
                .is_some_and(|d| d.read(&cpu.scoreboard).is_some());
            let at_rob_head = cpu.rob.peek_head().is_some_and(|e| e.seq == head.op.seq);
            if !data_ready || !at_rob_head {
                return;
            }
        }
        MemOp::None => {
            warn!(pc = head.op.pc, insn = %head.op.insn, "non-memory instruction at LSQ head");
            let _ = cpu.lsq.pop_head();
            return;
        }
    }

    let Some(entry) = cpu.lsq.pop_head() else {
        return;
    };
    let mut op = entry.op;
    op.mem_addr = Some(idx);
    if op.ctrl.mem == MemOp::Store {
        op.result = op.src1.and_then(|d| d.read(&cpu.scoreboard)).unwrap_or(0);
        cpu.memory.set_ready(idx, false);
        cpu.rob.set_mem_addr(op.seq, idx);
    }
    trace!(pc = op.pc, idx, "lsq -> dcache");
    cpu.latches.dcache = Some(op);
}

/// Performs the data cache access for the instruction in the dcache latch.
pub fn dcache_stage(cpu: &mut Cpu) {
    let Some(op) = cpu.latches.dcache.take() else {
        return;
    };
    let Some(idx) = op.mem_addr else {
        warn!(pc = op.pc, "dcache entry without an address");
        return;
    };

    match op.ctrl.mem {
        MemOp::Load => {
            let val = cpu.memory.read(idx);
            trace!(pc = op.pc, idx, val, "load");
            if let Some(pd) = op.dest {
                cpu.scoreboard.publish(pd, val);
            }
        }
        MemOp::Store => {
            trace!(pc = op.pc, idx, val = op.result, "store");
            cpu.memory.write(idx, op.result);
            cpu.memory.set_ready(idx, true);
            cpu.rob.complete(op.seq);
        }
        MemOp::None => {}
    }
}
