//! Wrong-path recovery.
//!
//! Squashes every instruction younger than a redirecting branch or jump in a
//! single call, so no structure holds a wrong-path entry once it returns.

use tracing::debug;

use crate::common::reg::SeqNum;
use crate::core::Cpu;
use crate::core::pipeline::signals::MemOp;

/// Removes all state younger than `seq` and returns the number of squashed instructions.
///
/// # Arguments
///
/// * `cpu` - Machine to recover.
/// * `seq` - The redirecting instruction; it and everything older survive.
///
/// Physical registers bound by squashed instructions return to the free list.
/// Fetch gating is lifted; the caller sets the new pc.
pub fn squash_younger(cpu: &mut Cpu, seq: SeqNum) -> usize {
    let flushed = cpu.rob.flush_after(seq);
    for entry in &flushed {
        if entry.ctrl.mem == MemOp::Store {
            if let Some(idx) = entry.mem_addr {
                cpu.memory.set_ready(idx, true);
            }
        }
    }
    let mut squashed = flushed.len();

    let _ = cpu.iq.squash_younger(seq);
    let _ = cpu.lsq.squash_younger(seq);

    let latches = &mut cpu.latches;
    for slot in [&mut latches.int_fu, &mut latches.logical_fu, &mut latches.dcache]
        .into_iter()
        .chain(latches.mul.iter_mut())
    {
        if slot.as_ref().is_some_and(|op| op.seq > seq) {
            *slot = None;
        }
    }
    if latches.dispatch.as_ref().is_some_and(|op| op.seq > seq) {
        latches.dispatch = None;
        squashed += 1;
    }
    if latches.fetch.is_some_and(|f| f.seq > seq) {
        latches.fetch = None;
        squashed += 1;
    }

    for phys in cpu.rename_map.squash_younger(seq) {
        cpu.scoreboard.release(phys);
        cpu.free_list.release(phys);
    }

    cpu.jump_in_flight = false;
    cpu.fetch_halted = false;
    cpu.stats.squashed += squashed as u64;
    debug!(seq = seq.0, squashed, "squash");
    squashed
}
