//! Fetch Stage: instruction lookup and BTB-directed next-pc selection.
//!
//! Fetch reads one instruction per cycle at `cpu.pc` into the fetch latch. It
//! does nothing while:
//! 1. the fetch latch is still occupied (decode backpressure),
//! 2. a JUMP is waiting to retire, or a HALT has been fetched,
//! 3. the pc lies outside the program.

use tracing::trace;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::Cpu;
use crate::core::pipeline::latches::FetchEntry;
use crate::isa::instruction::Opcode;

/// Executes the Fetch stage.
///
/// An active BTB entry for the fetch address decides the next pc: a taken
/// prediction redirects to the stored target and clears the whole table, a
/// not-taken prediction is consumed and fetch falls through.
pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.fetch_halted || cpu.jump_in_flight || cpu.latches.fetch.is_some() {
        return;
    }

    let pc = cpu.pc;
    let Some(&insn) = cpu.program.lookup(pc) else {
        return;
    };

    let mut next_pc = pc.wrapping_add(INSTRUCTION_SIZE);
    let mut predicted_taken = false;
    if let Some(pred) = cpu.btb.lookup(pc) {
        if pred.taken {
            trace!(pc, target = pred.target, "btb predicts taken");
            next_pc = pred.target;
            predicted_taken = true;
            cpu.btb.clear();
        } else {
            cpu.btb.remove(pc);
        }
    }

    let seq = cpu.next_seq;
    cpu.next_seq = seq.next();
    cpu.latches.fetch = Some(FetchEntry {
        seq,
        pc,
        insn,
        predicted_taken,
    });

    match insn.opcode {
        Opcode::Halt => cpu.fetch_halted = true,
        Opcode::Jump => cpu.jump_in_flight = true,
        _ => {}
    }

    trace!(pc, seq = seq.0, %insn, "fetch");
    cpu.pc = next_pc;
}
