//! Cycle engine.
//!
//! One call to [`tick`] advances every stage exactly once. Stages run
//! back-to-front so that a value produced this cycle is visible to stages
//! scheduled later in the same cycle:
//! 1. **Execute:** Integer/AGEN, Logical, Mul4..Mul1.
//! 2. **Memory:** Data cache, then commit from the ROB head.
//! 3. **Scheduling:** LSQ head, issue queue.
//! 4. **Front end:** Dispatch, Decode/Rename, Fetch.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::backend::commit::commit_stage;
use crate::core::pipeline::backend::execute::{int_fu_stage, logical_fu_stage, multiplier_stages};
use crate::core::pipeline::backend::issue::issue_stage;
use crate::core::pipeline::backend::memory::{dcache_stage, lsq_stage};
use crate::core::pipeline::frontend::dispatch::dispatch_stage;
use crate::core::pipeline::frontend::fetch::fetch_stage;
use crate::core::pipeline::frontend::rename::rename_stage;
use crate::core::pipeline::traits::{Stage, TraceSink};

/// Reports every occupied stage to the sink.
fn report(cpu: &Cpu, sink: &mut dyn TraceSink) {
    let cycle = cpu.stats.cycles;
    if !(cpu.fetch_halted || cpu.jump_in_flight) {
        if let Some(insn) = cpu.program.lookup(cpu.pc) {
            sink.on_stage(cycle, Stage::Fetch, cpu.pc, insn);
        }
    }
    if let Some(f) = &cpu.latches.fetch {
        sink.on_stage(cycle, Stage::DecodeRename, f.pc, &f.insn);
    }

    let l = &cpu.latches;
    let units = [
        (Stage::Dispatch, &l.dispatch),
        (Stage::IntFu, &l.int_fu),
        (Stage::LogicalFu, &l.logical_fu),
        (Stage::DCache, &l.dcache),
    ]
    .into_iter()
    .chain(
        l.mul
            .iter()
            .enumerate()
            .map(|(i, slot)| (Stage::Mul(i as u8 + 1), slot)),
    );
    for (stage, slot) in units {
        if let Some(op) = slot {
            sink.on_stage(cycle, stage, op.pc, &op.insn);
        }
    }

    for op in cpu.iq.iter() {
        sink.on_stage(cycle, Stage::IssueQueue, op.pc, &op.insn);
    }
    for entry in cpu.lsq.iter() {
        sink.on_stage(cycle, Stage::Lsq, entry.op.pc, &entry.op.insn);
    }
    if let Some(head) = cpu.rob.peek_head() {
        sink.on_stage(cycle, Stage::RobHead, head.pc, &head.insn);
    }
}

/// Advances the machine by one cycle.
///
/// # Arguments
///
/// * `cpu` - The machine.
/// * `trace` - Optional observer, told about every occupied stage before the cycle runs.
///
/// # Returns
///
/// `true` once HALT has retired or the program has drained without one.
///
/// # Errors
///
/// Returns the fault of a faulted instruction that reached the ROB head.
pub fn tick(cpu: &mut Cpu, trace: Option<&mut (dyn TraceSink + '_)>) -> Result<bool, SimError> {
    if cpu.done {
        return Ok(true);
    }
    cpu.stats.cycles += 1;
    if let Some(sink) = trace {
        report(cpu, sink);
    }

    int_fu_stage(cpu);
    logical_fu_stage(cpu);
    multiplier_stages(cpu);
    dcache_stage(cpu);
    commit_stage(cpu)?;
    if cpu.done {
        return Ok(true);
    }

    lsq_stage(cpu);
    issue_stage(cpu);
    dispatch_stage(cpu);
    rename_stage(cpu);
    fetch_stage(cpu);

    if cpu.fetch_exhausted() && cpu.pipeline_empty() {
        cpu.done = true;
    }
    Ok(cpu.done)
}
