//! Decode/Rename Stage: source lookup and destination allocation.
//!
//! Takes the fetched instruction and produces a renamed [`InFlight`] in the
//! dispatch latch. Sources are resolved against the rename map before the
//! destination is bound, so `ADD R1,R1,R2` reads the previous `R1`.
//! 1. **Sources:** Resolve to the newest in-flight producer, or to the committed value.
//! 2. **Destination:** Allocate a physical register, mark it pending, bind it.
//! 3. **Branches:** Read the renamed zero flag and reserve a BTB entry.

use tracing::trace;

use crate::common::reg::ArchReg;
use crate::core::Cpu;
use crate::core::pipeline::latches::{InFlight, Operand};
use crate::core::pipeline::rename_map::RenameTarget;

/// Resolves a rename target to an operand.
fn resolve(cpu: &Cpu, target: RenameTarget) -> Operand {
    match cpu.rename_map.resolve(target) {
        Some(phys) => Operand::Phys(phys),
        None => Operand::Value(match target {
            RenameTarget::Gpr(reg) => cpu.regs.read(reg),
            RenameTarget::ZeroFlag => cpu.regs.zero_flag(),
        }),
    }
}

fn resolve_reg(cpu: &Cpu, reg: Option<ArchReg>) -> Option<Operand> {
    reg.map(|r| resolve(cpu, RenameTarget::Gpr(r)))
}

/// Executes the Decode/Rename stage.
///
/// Stalls, leaving the fetch latch occupied, while the dispatch latch is full
/// or the instruction needs a physical register and none is free.
pub fn rename_stage(cpu: &mut Cpu) {
    if cpu.latches.dispatch.is_some() {
        return;
    }
    let Some(fetched) = cpu.latches.fetch else {
        return;
    };

    let mut op = InFlight::new(&fetched);
    if op.ctrl.dest.allocates() && cpu.free_list.is_empty() {
        cpu.stats.stalls_rename += 1;
        return;
    }

    if !op.ctrl.jump {
        op.src1 = resolve_reg(cpu, fetched.insn.rs1);
        op.src2 = resolve_reg(cpu, fetched.insn.rs2);
        op.src3 = resolve_reg(cpu, fetched.insn.rs3);
    }
    if op.ctrl.branch {
        op.flag = Some(resolve(cpu, RenameTarget::ZeroFlag));
        cpu.btb.allocate(fetched.pc);
    }

    if op.ctrl.dest.allocates() {
        let Some(pd) = cpu.free_list.allocate() else {
            return;
        };
        cpu.scoreboard.mark_pending(pd);
        if op.ctrl.dest.writes_gpr() {
            if let Some(rd) = fetched.insn.rd {
                cpu.rename_map.bind(RenameTarget::Gpr(rd), pd, op.seq);
            }
        }
        if op.ctrl.dest.writes_flag() {
            cpu.rename_map.bind(RenameTarget::ZeroFlag, pd, op.seq);
        }
        op.dest = Some(pd);
    }

    trace!(pc = op.pc, seq = op.seq.0, dest = ?op.dest, "rename");
    cpu.latches.fetch = None;
    cpu.latches.dispatch = Some(op);
}
