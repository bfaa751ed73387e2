//! Physical register free list.
//!
//! FIFO pool of unallocated physical registers: allocation takes the register
//! that has been free the longest, release appends to the tail.

use std::collections::VecDeque;

use crate::common::reg::PhysReg;

/// FIFO pool of free physical registers.
#[derive(Clone, Debug)]
pub struct FreeList {
    free: VecDeque<PhysReg>,
    total: usize,
}

impl FreeList {
    /// Creates a pool holding `P0`..`P(total - 1)`, all free.
    pub fn new(total: usize) -> Self {
        Self {
            free: (0..total).map(|i| PhysReg(i as u16)).collect(),
            total,
        }
    }

    /// Removes and returns the oldest free register, or `None` when exhausted.
    pub fn allocate(&mut self) -> Option<PhysReg> {
        self.free.pop_front()
    }

    /// Returns a register to the tail of the pool.
    ///
    /// Releasing a register that is already free is ignored, so recovery paths
    /// that reach the same register twice cannot duplicate it.
    pub fn release(&mut self, reg: PhysReg) {
        if self.free.contains(&reg) {
            tracing::warn!(%reg, "double release of physical register ignored");
            return;
        }
        self.free.push_back(reg);
    }

    /// Number of free registers.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Returns true if no register can be allocated.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Size of the whole pool.
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns true if `reg` is currently free.
    pub fn contains(&self, reg: PhysReg) -> bool {
        self.free.contains(&reg)
    }
}
