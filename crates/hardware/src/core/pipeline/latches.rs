//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between stages:
//! Fetch → Decode/Rename → Dispatch → IQ/LSQ → Int/Logical/Mul1..4/DCache → ROB.
//!
//! 1. **Operands:** A source is either a captured value or the physical register that will produce it.
//! 2. **Instruction Flow:** `FetchEntry` before renaming, `InFlight` after.
//! 3. **Unit Registers:** One single-slot register per functional unit stage.

use crate::common::constants::MUL_STAGES;
use crate::common::reg::{PhysReg, SeqNum};
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::pipeline::signals::{ControlSignals, MemOp};
use crate::isa::instruction::Instruction;

/// A renamed source operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Value already known (read from architectural state or forwarded at commit).
    Value(i32),
    /// Value will appear in this physical register.
    Phys(PhysReg),
}

impl Operand {
    /// Reads the operand if its value is available.
    #[inline]
    pub fn read(self, sb: &Scoreboard) -> Option<i32> {
        match self {
            Self::Value(v) => Some(v),
            Self::Phys(p) => sb.read(p),
        }
    }

    /// Replaces a reference to `phys` with its committed value.
    #[inline]
    pub fn capture(&mut self, phys: PhysReg, val: i32) {
        if *self == Self::Phys(phys) {
            *self = Self::Value(val);
        }
    }
}

/// Entry in the fetch latch (Fetch to Decode/Rename).
#[derive(Clone, Copy, Debug)]
pub struct FetchEntry {
    /// Program-order ticket.
    pub seq: SeqNum,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub insn: Instruction,
    /// Fetch redirected to the BTB target after this instruction.
    pub predicted_taken: bool,
}

/// A renamed instruction travelling from dispatch to retirement.
#[derive(Clone, Debug)]
pub struct InFlight {
    /// Program-order ticket.
    pub seq: SeqNum,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub insn: Instruction,
    /// Control signals from decode.
    pub ctrl: ControlSignals,
    /// Renamed destination.
    pub dest: Option<PhysReg>,
    /// Renamed `rs1` (the data register for stores).
    pub src1: Option<Operand>,
    /// Renamed `rs2`.
    pub src2: Option<Operand>,
    /// Renamed `rs3`.
    pub src3: Option<Operand>,
    /// Renamed zero flag (conditional branches).
    pub flag: Option<Operand>,
    /// Fetch predicted this branch taken.
    pub predicted_taken: bool,
    /// Unit output: ALU result, product, loaded value or store data.
    pub result: i32,
    /// Effective data address for memory instructions.
    pub mem_addr: Option<usize>,
}

impl InFlight {
    /// Creates an entry with no renamed operands.
    pub fn new(fetched: &FetchEntry) -> Self {
        Self {
            seq: fetched.seq,
            pc: fetched.pc,
            insn: fetched.insn,
            ctrl: ControlSignals::for_opcode(fetched.insn.opcode),
            dest: None,
            src1: None,
            src2: None,
            src3: None,
            flag: None,
            predicted_taken: fetched.predicted_taken,
            result: 0,
            mem_addr: None,
        }
    }

    /// Operands that must be available before the instruction can issue.
    ///
    /// Stores issue for address generation only; their data operand is
    /// checked again at the head of the load-store queue.
    pub fn issue_operands(&self) -> [Option<Operand>; 4] {
        if self.ctrl.mem == MemOp::Store {
            [self.src2, self.src3, None, None]
        } else if self.ctrl.jump {
            [None; 4]
        } else {
            [self.src1, self.src2, self.src3, self.flag]
        }
    }

    /// Whether every operand gating issue is available.
    pub fn issue_ready(&self, sb: &Scoreboard) -> bool {
        self.issue_operands()
            .into_iter()
            .flatten()
            .all(|op| op.read(sb).is_some())
    }

    /// Replaces every reference to `phys` with its committed value.
    pub fn capture(&mut self, phys: PhysReg, val: i32) {
        for op in [&mut self.src1, &mut self.src2, &mut self.src3, &mut self.flag]
            .into_iter()
            .flatten()
        {
            op.capture(phys, val);
        }
    }

    /// Reads a source operand, defaulting to zero when the slot is unused.
    pub fn read(op: Option<Operand>, sb: &Scoreboard) -> i32 {
        op.and_then(|o| o.read(sb)).unwrap_or(0)
    }
}

/// Single-slot pipeline registers between stages.
#[derive(Clone, Debug, Default)]
pub struct Latches {
    /// Fetched, not yet renamed.
    pub fetch: Option<FetchEntry>,
    /// Renamed, waiting for ROB/IQ/LSQ admission.
    pub dispatch: Option<InFlight>,
    /// Integer/AGEN unit.
    pub int_fu: Option<InFlight>,
    /// Logical unit.
    pub logical_fu: Option<InFlight>,
    /// Multiplier stages 1 to 4.
    pub mul: [Option<InFlight>; MUL_STAGES],
    /// Data cache access.
    pub dcache: Option<InFlight>,
}

impl Latches {
    /// Unit registers holding renamed instructions, in no particular order.
    pub fn units(&self) -> impl Iterator<Item = &InFlight> {
        [&self.int_fu, &self.logical_fu, &self.dcache]
            .into_iter()
            .chain(self.mul.iter())
            .flatten()
    }

    /// Mutable access to every unit register holding an instruction.
    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut InFlight> {
        [&mut self.int_fu, &mut self.logical_fu, &mut self.dcache]
            .into_iter()
            .chain(self.mul.iter_mut())
            .flatten()
    }

    /// Forwards a committed value to every latched instruction waiting on `phys`.
    pub fn capture(&mut self, phys: PhysReg, val: i32) {
        if let Some(op) = self.dispatch.as_mut() {
            op.capture(phys, val);
        }
        for op in self.units_mut() {
            op.capture(phys, val);
        }
    }

    /// Returns true when no stage holds an instruction.
    pub fn is_empty(&self) -> bool {
        self.fetch.is_none() && self.dispatch.is_none() && self.units().next().is_none()
    }
}
