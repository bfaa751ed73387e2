//! Physical register scoreboard.
//!
//! Holds the readiness bit and value of every physical register. A register
//! is not ready from the moment decode allocates it until its producer
//! publishes a value; freed registers read as ready.

use crate::common::reg::PhysReg;

/// Readiness and value table for the physical register pool.
#[derive(Clone, Debug)]
pub struct Scoreboard {
    ready: Vec<bool>,
    value: Vec<i32>,
}

impl Scoreboard {
    /// Creates a scoreboard for `size` physical registers, all ready and zero.
    pub fn new(size: usize) -> Self {
        Self {
            ready: vec![true; size],
            value: vec![0; size],
        }
    }

    /// Marks a register as awaiting its producer.
    pub fn mark_pending(&mut self, reg: PhysReg) {
        self.ready[reg.index()] = false;
    }

    /// Publishes a produced value and marks the register ready.
    pub fn publish(&mut self, reg: PhysReg, val: i32) {
        self.value[reg.index()] = val;
        self.ready[reg.index()] = true;
    }

    /// Marks a freed register ready so stale readers never block on it.
    pub fn release(&mut self, reg: PhysReg) {
        self.ready[reg.index()] = true;
    }

    /// Returns whether the register holds its produced value.
    #[inline]
    pub fn is_ready(&self, reg: PhysReg) -> bool {
        self.ready[reg.index()]
    }

    /// Returns the register value once it is ready.
    #[inline]
    pub fn read(&self, reg: PhysReg) -> Option<i32> {
        self.is_ready(reg).then_some(self.value[reg.index()])
    }

    /// Returns the register value regardless of readiness.
    #[inline]
    pub fn value(&self, reg: PhysReg) -> i32 {
        self.value[reg.index()]
    }

    /// Number of physical registers tracked.
    pub fn len(&self) -> usize {
        self.ready.len()
    }

    /// Returns true for an empty pool.
    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }
}
