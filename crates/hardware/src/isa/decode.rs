//! Assembly decoder.
//!
//! Turns one line of assembly into an [`Instruction`]. The mnemonic is followed
//! by whitespace or a comma; operands are comma separated. Registers are
//! written `R0`..`R15` and immediates `#n`.

use crate::common::error::ProgramError;
use crate::common::reg::ArchReg;
use crate::isa::instruction::{Instruction, Opcode};

/// Operand layout of an instruction in assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// `rd, #imm`
    DestImm,
    /// `rd, rs1, rs2`
    DestSrcSrc,
    /// `rd, rs1, #imm`
    DestSrcImm,
    /// `rs1, rs2, #imm`
    SrcSrcImm,
    /// `rs1, rs2, rs3`
    SrcSrcSrc,
    /// `rs1, rs2`
    SrcSrc,
    /// `#imm`
    Imm,
    /// `rs1, #imm`
    SrcImm,
    /// no operands
    Bare,
}

impl Format {
    const fn of(op: Opcode) -> Self {
        match op {
            Opcode::Movc => Self::DestImm,
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Ldr => Self::DestSrcSrc,
            Opcode::Addl | Opcode::Subl | Opcode::Load => Self::DestSrcImm,
            Opcode::Store => Self::SrcSrcImm,
            Opcode::Str => Self::SrcSrcSrc,
            Opcode::Cmp => Self::SrcSrc,
            Opcode::Bz | Opcode::Bnz => Self::Imm,
            Opcode::Jump => Self::SrcImm,
            Opcode::Halt | Opcode::Nop => Self::Bare,
        }
    }

    const fn arity(self) -> usize {
        match self {
            Self::DestSrcSrc | Self::DestSrcImm | Self::SrcSrcImm | Self::SrcSrcSrc => 3,
            Self::DestImm | Self::SrcSrc | Self::SrcImm => 2,
            Self::Imm => 1,
            Self::Bare => 0,
        }
    }
}

/// Parses one instruction.
///
/// # Arguments
///
/// * `text` - The instruction text with comments already stripped.
/// * `line` - 1-based source line used in error messages.
///
/// # Errors
///
/// Returns a [`ProgramError`] naming the line when the mnemonic is unknown,
/// the operand count is wrong, or an operand is malformed.
pub fn parse_instruction(text: &str, line: usize) -> Result<Instruction, ProgramError> {
    let text = text.trim();
    let split = text
        .find(|c: char| c.is_whitespace() || c == ',')
        .unwrap_or(text.len());
    let (mnemonic, rest) = text.split_at(split);

    let opcode =
        Opcode::from_mnemonic(mnemonic).ok_or_else(|| ProgramError::UnknownMnemonic {
            line,
            mnemonic: mnemonic.to_string(),
        })?;

    let operands: Vec<&str> = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let format = Format::of(opcode);
    if operands.len() != format.arity() {
        return Err(ProgramError::OperandCount {
            line,
            mnemonic: opcode.mnemonic().to_string(),
            expected: format.arity(),
            found: operands.len(),
        });
    }

    let reg = |i: usize| parse_reg(operands[i], opcode, line);
    let imm = |i: usize| parse_imm(operands[i], opcode, line);

    let mut insn = Instruction::bare(opcode, 0);
    match format {
        Format::DestImm => {
            insn.rd = Some(reg(0)?);
            insn.imm = imm(1)?;
        }
        Format::DestSrcSrc => {
            insn.rd = Some(reg(0)?);
            insn.rs1 = Some(reg(1)?);
            insn.rs2 = Some(reg(2)?);
        }
        Format::DestSrcImm => {
            insn.rd = Some(reg(0)?);
            insn.rs1 = Some(reg(1)?);
            insn.imm = imm(2)?;
        }
        Format::SrcSrcImm => {
            insn.rs1 = Some(reg(0)?);
            insn.rs2 = Some(reg(1)?);
            insn.imm = imm(2)?;
        }
        Format::SrcSrcSrc => {
            insn.rs1 = Some(reg(0)?);
            insn.rs2 = Some(reg(1)?);
            insn.rs3 = Some(reg(2)?);
        }
        Format::SrcSrc => {
            insn.rs1 = Some(reg(0)?);
            insn.rs2 = Some(reg(1)?);
        }
        Format::Imm => insn.imm = imm(0)?,
        Format::SrcImm => {
            insn.rs1 = Some(reg(0)?);
            insn.imm = imm(1)?;
        }
        Format::Bare => {}
    }
    Ok(insn)
}

fn bad_operand(token: &str, opcode: Opcode, line: usize) -> ProgramError {
    ProgramError::BadOperand {
        line,
        mnemonic: opcode.mnemonic().to_string(),
        operand: token.to_string(),
    }
}

fn parse_reg(token: &str, opcode: Opcode, line: usize) -> Result<ArchReg, ProgramError> {
    token
        .strip_prefix(|c: char| c.eq_ignore_ascii_case(&'r'))
        .and_then(|n| n.parse::<u8>().ok())
        .and_then(ArchReg::new)
        .ok_or_else(|| bad_operand(token, opcode, line))
}

fn parse_imm(token: &str, opcode: Opcode, line: usize) -> Result<i32, ProgramError> {
    token
        .strip_prefix('#')
        .and_then(|n| n.parse::<i32>().ok())
        .ok_or_else(|| bad_operand(token, opcode, line))
}
