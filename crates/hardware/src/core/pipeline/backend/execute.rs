//! Execute Stage: Integer/AGEN, Logical and the four-stage multiplier.
//!
//! Results are published to the scoreboard as soon as a unit finishes, which
//! wakes dependents in the issue queue during the same cycle.
//! 1. **Integer/AGEN:** Arithmetic, CMP, effective addresses, branch and jump resolution.
//! 2. **Logical:** AND, OR, XOR.
//! 3. **Multiplier:** Stage 1 multiplies, stages 2 and 3 delay, stage 4 writes back.

use tracing::{debug, trace};

use crate::common::constants::{INSTRUCTION_SIZE, MUL_STAGES};
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::backend::recovery;
use crate::core::pipeline::latches::InFlight;
use crate::core::pipeline::lsq::LsqAddress;
use crate::core::pipeline::signals::MemOp;
use crate::core::units::alu::Alu;
use crate::core::units::bru::{branch_taken, branch_target};

/// Second ALU operand: the immediate or `rs2`.
fn operand_b(cpu: &Cpu, op: &InFlight) -> i32 {
    if op.ctrl.b_imm {
        op.insn.imm
    } else {
        InFlight::read(op.src2, &cpu.scoreboard)
    }
}

/// Publishes an ALU result, or a fault when the operation has none.
fn write_result(cpu: &mut Cpu, op: &InFlight, result: Option<i32>) {
    let Some(pd) = op.dest else {
        return;
    };
    match result {
        Some(val) => cpu.scoreboard.publish(pd, val),
        None => {
            cpu.scoreboard.publish(pd, 0);
            cpu.rob.fault(op.seq, SimError::DivideByZero { pc: op.pc });
        }
    }
}

/// Computes a memory instruction's effective address and hands it to the LSQ.
///
/// Loads address `rs1 + (rs2 | imm)`; stores address `rs2 + (rs3 | imm)`,
/// their `rs1` being the data register.
fn generate_address(cpu: &mut Cpu, op: &InFlight) {
    let sb = &cpu.scoreboard;
    let (base, index) = if op.ctrl.mem == MemOp::Store {
        (op.src2, op.src3)
    } else {
        (op.src1, op.src2)
    };
    let base = InFlight::read(base, sb);
    let offset = if op.ctrl.b_imm {
        op.insn.imm
    } else {
        InFlight::read(index, sb)
    };

    let addr = i64::from(base) + i64::from(offset);
    match cpu.memory.translate(addr) {
        Some(idx) => {
            trace!(pc = op.pc, addr, "agen");
            cpu.lsq.set_address(op.seq, LsqAddress::Ready(idx));
        }
        None => {
            debug!(pc = op.pc, addr, "data address out of range");
            cpu.lsq.set_address(op.seq, LsqAddress::Faulted);
            cpu.rob.fault(op.seq, SimError::AddressOutOfRange { pc: op.pc, addr });
        }
    }
}

/// Resolves a conditional branch, updates the BTB and recovers on a mismatch.
fn resolve_branch(cpu: &mut Cpu, op: &InFlight) {
    let flag = InFlight::read(op.flag, &cpu.scoreboard);
    let taken = branch_taken(op.insn.opcode, flag);
    let target = branch_target(op.pc, op.insn.imm);
    cpu.btb.update(op.pc, target, taken);
    cpu.rob.complete(op.seq);

    if taken == op.predicted_taken {
        cpu.stats.branch_predictions += 1;
        return;
    }

    cpu.stats.branch_mispredictions += 1;
    cpu.stats.flushes += 1;
    let squashed = recovery::squash_younger(cpu, op.seq);
    cpu.pc = if taken {
        target
    } else {
        op.pc.wrapping_add(INSTRUCTION_SIZE)
    };
    debug!(
        pc = op.pc,
        taken,
        redirect = cpu.pc,
        squashed,
        "branch mispredicted"
    );
}

/// Executes the Integer/AGEN unit.
pub fn int_fu_stage(cpu: &mut Cpu) {
    let Some(op) = cpu.latches.int_fu.take() else {
        return;
    };

    if op.ctrl.mem != MemOp::None {
        generate_address(cpu, &op);
    } else if op.ctrl.branch {
        resolve_branch(cpu, &op);
    } else if op.ctrl.jump {
        let target = branch_target(op.pc, op.insn.imm);
        trace!(pc = op.pc, target, "jump resolved");
        cpu.rob.complete_with_target(op.seq, target);
    } else {
        let a = InFlight::read(op.src1, &cpu.scoreboard);
        let b = operand_b(cpu, &op);
        let result = Alu::execute(op.ctrl.alu, a, b);
        trace!(pc = op.pc, a, b, ?result, "int");
        write_result(cpu, &op, result);
    }
}

/// Executes the Logical unit.
pub fn logical_fu_stage(cpu: &mut Cpu) {
    let Some(op) = cpu.latches.logical_fu.take() else {
        return;
    };
    let a = InFlight::read(op.src1, &cpu.scoreboard);
    let b = operand_b(cpu, &op);
    let result = Alu::execute(op.ctrl.alu, a, b);
    trace!(pc = op.pc, a, b, ?result, "logical");
    write_result(cpu, &op, result);
}

/// Advances the multiplier pipeline by one stage.
///
/// Stage 4 publishes first, then every stage shifts down by one. The product is
/// computed on leaving stage 1 and carried in `result` until stage 4.
pub fn multiplier_stages(cpu: &mut Cpu) {
    let last = MUL_STAGES - 1;
    if let Some(op) = cpu.latches.mul[last].take() {
        trace!(pc = op.pc, result = op.result, "mul writeback");
        if let Some(pd) = op.dest {
            cpu.scoreboard.publish(pd, op.result);
        }
    }

    for stage in (1..MUL_STAGES).rev() {
        cpu.latches.mul[stage] = cpu.latches.mul[stage - 1].take();
    }

    if let Some(op) = cpu.latches.mul[1].as_mut() {
        let a = InFlight::read(op.src1, &cpu.scoreboard);
        let b = InFlight::read(op.src2, &cpu.scoreboard);
        op.result = Alu::execute(op.ctrl.alu, a, b).unwrap_or(0);
    }
}
