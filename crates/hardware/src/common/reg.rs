//! Register Identifiers.
//!
//! Strong types for the three kinds of names an in-flight instruction carries:
//! 1. **`ArchReg`:** An architectural register named by the program.
//! 2. **`PhysReg`:** A renaming resource handed out by the free list.
//! 3. **`SeqNum`:** A program-order ticket assigned at fetch.

use std::fmt;

use crate::common::constants::NUM_ARCH_REGS;

/// Architectural register index, always below [`NUM_ARCH_REGS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchReg(u8);

impl ArchReg {
    /// Creates a register identifier, or `None` if `idx` names no architectural register.
    pub const fn new(idx: u8) -> Option<Self> {
        if (idx as usize) < NUM_ARCH_REGS {
            Some(Self(idx))
        } else {
            None
        }
    }

    /// Returns the register index as a `usize` for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Physical register index into the renaming pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysReg(pub u16);

impl PhysReg {
    /// Returns the register index as a `usize` for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Program-order sequence number. Smaller is older.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeqNum(pub u64);

impl SeqNum {
    /// Returns the sequence number that follows this one.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}
