use oosim_core::common::constants::{CODE_BASE, INSTRUCTION_SIZE, NUM_ARCH_REGS, ZERO_FLAG_RESET};
use oosim_core::isa::{Opcode, Program};

/// Architectural state after sequential execution.
#[derive(Debug, PartialEq, Eq)]
pub struct RefState {
    pub registers: [i32; NUM_ARCH_REGS],
    pub valid: [bool; NUM_ARCH_REGS],
    pub zero_flag: i32,
    pub memory: Vec<i32>,
}

/// Executes `program` one instruction at a time until HALT or the end of the code.
///
/// Faulting programs are outside the model; divide by zero yields 0.
pub fn execute(program: &Program, words: usize) -> RefState {
    let mut s = RefState {
        registers: [0; NUM_ARCH_REGS],
        valid: [false; NUM_ARCH_REGS],
        zero_flag: ZERO_FLAG_RESET,
        memory: vec![0; words],
    };
    let mut pc = CODE_BASE;

    for _ in 0..100_000 {
        let Some(insn) = program.lookup(pc) else {
            break;
        };
        let r = |o: Option<oosim_core::common::reg::ArchReg>| o.map_or(0, |r| s.registers[r.index()]);
        let (a, b, c) = (r(insn.rs1), r(insn.rs2), r(insn.rs3));
        let mut next = pc + INSTRUCTION_SIZE;
        let mut result = None;

        match insn.opcode {
            Opcode::Movc => result = Some(insn.imm),
            Opcode::Add => result = Some(a.wrapping_add(b)),
            Opcode::Sub => {
                let v = a.wrapping_sub(b);
                s.zero_flag = v;
                result = Some(v);
            }
            Opcode::Subl => {
                let v = a.wrapping_sub(insn.imm);
                s.zero_flag = v;
                result = Some(v);
            }
            Opcode::Addl => result = Some(a.wrapping_add(insn.imm)),
            Opcode::Mul => result = Some(a.wrapping_mul(b)),
            Opcode::Div => result = Some(a.checked_div(b).unwrap_or(0)),
            Opcode::And => result = Some(a & b),
            Opcode::Or => result = Some(a | b),
            Opcode::Xor => result = Some(a ^ b),
            Opcode::Cmp => s.zero_flag = a.wrapping_sub(b),
            Opcode::Load => result = Some(s.memory[(a + insn.imm) as usize]),
            Opcode::Ldr => result = Some(s.memory[(a + b) as usize]),
            Opcode::Store => s.memory[(b + insn.imm) as usize] = a,
            Opcode::Str => s.memory[(b + c) as usize] = a,
            Opcode::Bz if s.zero_flag == 0 => next = pc.wrapping_add_signed(insn.imm),
            Opcode::Bnz if s.zero_flag != 0 => next = pc.wrapping_add_signed(insn.imm),
            Opcode::Jump => next = pc.wrapping_add_signed(insn.imm),
            Opcode::Halt => break,
            Opcode::Bz | Opcode::Bnz | Opcode::Nop => {}
        }

        if let (Some(v), Some(rd)) = (result, insn.rd) {
            s.registers[rd.index()] = v;
            s.valid[rd.index()] = true;
        }
        pc = next;
    }
    s
}
