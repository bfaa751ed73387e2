//! Instruction Disassembler.
//!
//! Formats an [`Instruction`] back into the assembly accepted by
//! [`parse_instruction`](crate::isa::decode::parse_instruction), for stage
//! traces, logging and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use oosim_core::isa::decode::parse_instruction;
//! let insn = parse_instruction("ADDL R1,R2,#-4", 1).unwrap();
//! assert_eq!(insn.to_string(), "ADDL R1,R2,#-4");
//! ```

use std::fmt;

use crate::common::reg::ArchReg;
use crate::isa::instruction::Instruction;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;

        let regs: [Option<ArchReg>; 4] = [self.rd, self.rs1, self.rs2, self.rs3];
        let mut sep = " ";
        for reg in regs.into_iter().flatten() {
            write!(f, "{sep}{reg}")?;
            sep = ",";
        }
        if has_immediate(self) {
            write!(f, "{sep}#{}", self.imm)?;
        }
        Ok(())
    }
}

fn has_immediate(insn: &Instruction) -> bool {
    use crate::isa::instruction::Opcode::{
        Addl, Bnz, Bz, Jump, Load, Movc, Store, Subl,
    };
    matches!(
        insn.opcode,
        Movc | Addl | Subl | Load | Store | Bz | Bnz | Jump
    )
}
