//! Opcodes, decoded instruction records and programs.
//!
//! The pipeline never sees assembly text: it consumes [`Instruction`] records
//! looked up by program counter in a [`Program`].

use crate::common::constants::{CODE_BASE, INSTRUCTION_SIZE};
use crate::common::error::ProgramError;
use crate::common::reg::ArchReg;

/// Every operation the machine implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `rd = imm`
    Movc,
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 - rs2`, also writes the zero flag.
    Sub,
    /// `rd = rs1 * rs2` on the pipelined multiplier.
    Mul,
    /// `rd = rs1 / rs2`
    Div,
    /// `rd = rs1 & rs2`
    And,
    /// `rd = rs1 | rs2`
    Or,
    /// `rd = rs1 ^ rs2`
    Xor,
    /// `rd = rs1 + imm`
    Addl,
    /// `rd = rs1 - imm`, also writes the zero flag.
    Subl,
    /// `rd = mem[rs1 + imm]`
    Load,
    /// `rd = mem[rs1 + rs2]`
    Ldr,
    /// `mem[rs2 + imm] = rs1`
    Store,
    /// `mem[rs2 + rs3] = rs1`
    Str,
    /// `flag = rs1 - rs2`
    Cmp,
    /// Branch to `pc + imm` if the zero flag is zero.
    Bz,
    /// Branch to `pc + imm` if the zero flag is nonzero.
    Bnz,
    /// Unconditional jump to `pc + imm`.
    Jump,
    /// Stop fetching; the run completes when it retires.
    Halt,
    /// No operation.
    Nop,
}

impl Opcode {
    /// All opcodes, in the order their mnemonics are listed in documentation.
    pub const ALL: [Self; 20] = [
        Self::Movc,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Addl,
        Self::Subl,
        Self::Load,
        Self::Ldr,
        Self::Store,
        Self::Str,
        Self::Cmp,
        Self::Bz,
        Self::Bnz,
        Self::Jump,
        Self::Halt,
        Self::Nop,
    ];

    /// Returns the assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Movc => "MOVC",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Addl => "ADDL",
            Self::Subl => "SUBL",
            Self::Load => "LOAD",
            Self::Ldr => "LDR",
            Self::Store => "STORE",
            Self::Str => "STR",
            Self::Cmp => "CMP",
            Self::Bz => "BZ",
            Self::Bnz => "BNZ",
            Self::Jump => "JUMP",
            Self::Halt => "HALT",
            Self::Nop => "NOP",
        }
    }

    /// Looks up an opcode by mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }
}

/// A decoded instruction.
///
/// Register slots not used by the opcode are `None`. For stores `rs1` is the
/// data register and `rs2`/`rs3` form the address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register.
    pub rd: Option<ArchReg>,
    /// First source register.
    pub rs1: Option<ArchReg>,
    /// Second source register.
    pub rs2: Option<ArchReg>,
    /// Third source register (`STR` index).
    pub rs3: Option<ArchReg>,
    /// Immediate or literal.
    pub imm: i32,
}

impl Instruction {
    /// Creates an instruction with no register operands.
    pub const fn bare(opcode: Opcode, imm: i32) -> Self {
        Self {
            opcode,
            rd: None,
            rs1: None,
            rs2: None,
            rs3: None,
            imm,
        }
    }
}

/// A finite program laid out from [`CODE_BASE`] at [`INSTRUCTION_SIZE`] strides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    code: Vec<Instruction>,
}

impl Program {
    /// Wraps a decoded instruction sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Empty`] if `code` has no instructions.
    pub fn new(code: Vec<Instruction>) -> Result<Self, ProgramError> {
        if code.is_empty() {
            return Err(ProgramError::Empty);
        }
        Ok(Self { code })
    }

    /// Returns the instruction at `pc`, or `None` past the end of the program
    /// or at an address that is not instruction aligned.
    pub fn lookup(&self, pc: u32) -> Option<&Instruction> {
        let offset = pc.checked_sub(CODE_BASE)?;
        if offset % INSTRUCTION_SIZE != 0 {
            return None;
        }
        self.code.get((offset / INSTRUCTION_SIZE) as usize)
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Returns true only for a default-constructed program.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Iterates `(pc, instruction)` pairs in program order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Instruction)> {
        self.code
            .iter()
            .enumerate()
            .map(|(i, insn)| (CODE_BASE + i as u32 * INSTRUCTION_SIZE, insn))
    }
}
