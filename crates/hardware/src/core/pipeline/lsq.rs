//! Load-Store Queue (LSQ).
//!
//! In-order FIFO of dispatched memory instructions. Only the head may move on
//! to the data cache, so memory is accessed strictly in program order and no
//! store-to-load bypass exists. Address generation happens in the integer unit
//! and is written back here by sequence number.

use std::collections::VecDeque;

use crate::common::reg::{PhysReg, SeqNum};
use crate::core::pipeline::latches::InFlight;

/// Address state of a queued memory instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LsqAddress {
    /// Address generation has not run yet.
    #[default]
    Pending,
    /// Word index into data memory.
    Ready(usize),
    /// The computed address is outside data memory.
    Faulted,
}

/// A queued memory instruction.
#[derive(Clone, Debug)]
pub struct LsqEntry {
    /// The instruction, carrying the store data operand.
    pub op: InFlight,
    /// Effective address state.
    pub addr: LsqAddress,
}

/// In-order queue of memory instructions.
#[derive(Clone, Debug)]
pub struct LoadStoreQueue {
    entries: VecDeque<LsqEntry>,
    capacity: usize,
}

impl LoadStoreQueue {
    /// Creates an empty queue holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of queued instructions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the queue is empty.
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

    /// Appends a dispatched memory instruction. Returns `false` if the queue is full.
    pub fn push(&mut self, op: InFlight) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries.push_back(LsqEntry {
            op,
            addr: LsqAddress::Pending,
        });
        true
    }

    /// Records the result of address generation for `seq`.
    pub fn set_address(&mut self, seq: SeqNum, addr: LsqAddress) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.op.seq == seq) {
            entry.addr = addr;
        }
    }

    /// The oldest queued instruction.
    pub fn head(&self) -> Option<&LsqEntry> {
        self.entries.front()
    }

    /// Removes the oldest queued instruction.
    pub fn pop_head(&mut self) -> Option<LsqEntry> {
        self.entries.pop_front()
    }

    /// Removes entries younger than `seq` and returns them.
    pub fn squash_younger(&mut self, seq: SeqNum) -> Vec<LsqEntry> {
        let mut squashed = Vec::new();
        while self.entries.back().is_some_and(|e| e.op.seq > seq) {
            if let Some(e) = self.entries.pop_back() {
                squashed.push(e);
            }
        }
        squashed.reverse();
        squashed
    }

    /// Replaces waiting references to `phys` with its committed value.
    pub fn capture(&mut self, phys: PhysReg, val: i32) {
        for entry in &mut self.entries {
            entry.op.capture(phys, val);
        }
    }

    /// Iterates queued instructions oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LsqEntry> {
        self.entries.iter()
    }
}
