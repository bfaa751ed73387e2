//! Architectural General-Purpose Register File.
//!
//! This module implements the committed register state. It performs the following:
//! 1. **Storage:** Maintains the 16 integer registers (`R0`-`R15`) with a valid bit each.
//! 2. **Flags:** Holds the committed zero flag written by `CMP`, `SUB` and `SUBL`.
//! 3. **Debugging:** Provides a dump of the complete register state.

use crate::common::constants::{NUM_ARCH_REGS, ZERO_FLAG_RESET};
use crate::common::reg::ArchReg;

/// Committed general-purpose registers.
///
/// A register's valid bit is set the first time an instruction writing it
/// retires; until then it reads as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_ARCH_REGS],
    valid: [bool; NUM_ARCH_REGS],
    zero_flag: i32,
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a register file with every register zero and invalid.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_ARCH_REGS],
            valid: [false; NUM_ARCH_REGS],
            zero_flag: ZERO_FLAG_RESET,
        }
    }

    /// Reads a register.
    #[inline]
    pub const fn read(&self, reg: ArchReg) -> i32 {
        self.regs[reg.index()]
    }

    /// Writes a register and marks it valid.
    #[inline]
    pub const fn write(&mut self, reg: ArchReg, val: i32) {
        self.regs[reg.index()] = val;
        self.valid[reg.index()] = true;
    }

    /// Returns whether a retired instruction has written this register.
    #[inline]
    pub const fn is_valid(&self, reg: ArchReg) -> bool {
        self.valid[reg.index()]
    }

    /// Committed zero flag: zero means the last flag-setting result was zero.
    #[inline]
    pub const fn zero_flag(&self) -> i32 {
        self.zero_flag
    }

    /// Commits a new zero-flag value.
    #[inline]
    pub const fn set_zero_flag(&mut self, val: i32) {
        self.zero_flag = val;
    }

    /// Snapshot of every register value, indexed by register number.
    pub const fn values(&self) -> [i32; NUM_ARCH_REGS] {
        self.regs
    }

    /// Snapshot of every valid bit, indexed by register number.
    pub const fn valid_bits(&self) -> [bool; NUM_ARCH_REGS] {
        self.valid
    }

    /// Dumps the contents of all registers to stdout.
    pub fn dump(&self) {
        for (i, (val, valid)) in self.regs.iter().zip(self.valid).enumerate() {
            let status = if valid { "VALID" } else { "INVALID" };
            println!("  R{i:<2} = {val:<10} [{status}]");
        }
        println!("  Z   = {}", self.zero_flag);
    }
}
