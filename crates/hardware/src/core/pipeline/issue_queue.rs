//! Issue Queue (reservation station).
//!
//! Holds dispatched instructions until their operands are available and their
//! functional unit is free. Selection scans entries in storage order and picks
//! the first ready match; age is not otherwise prioritized.

use crate::common::reg::{PhysReg, SeqNum};
use crate::core::pipeline::latches::InFlight;
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::pipeline::signals::FuncUnit;

/// Bounded pool of instructions awaiting issue.
#[derive(Clone, Debug)]
pub struct IssueQueue {
    entries: Vec<InFlight>,
    capacity: usize,
}

impl IssueQueue {
    /// Creates an empty queue holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of waiting instructions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if no further entry fits.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Configured capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Inserts a dispatched instruction. Returns `false` if the queue is full.
    pub fn insert(&mut self, op: InFlight) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries.push(op);
        true
    }

    /// Removes and returns the first entry bound for `unit` whose operands are ready.
    pub fn select(&mut self, unit: FuncUnit, sb: &Scoreboard) -> Option<InFlight> {
        let idx = self
            .entries
            .iter()
            .position(|op| op.ctrl.unit == Some(unit) && op.issue_ready(sb))?;
        Some(self.entries.remove(idx))
    }

    /// Removes entries that no unit accepts and returns them.
    pub fn purge_unissuable(&mut self) -> Vec<InFlight> {
        let (keep, purged): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|op| op.ctrl.unit.is_some());
        self.entries = keep;
        purged
    }

    /// Removes entries younger than `seq` and returns them.
    pub fn squash_younger(&mut self, seq: SeqNum) -> Vec<InFlight> {
        let (keep, squashed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|op| op.seq <= seq);
        self.entries = keep;
        squashed
    }

    /// Replaces waiting references to `phys` with its committed value.
    pub fn capture(&mut self, phys: PhysReg, val: i32) {
        for op in &mut self.entries {
            op.capture(phys, val);
        }
    }

    /// Iterates waiting instructions in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &InFlight> {
        self.entries.iter()
    }
}
