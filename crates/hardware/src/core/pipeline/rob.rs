//! Reorder Buffer (ROB) for in-order retirement.
//!
//! The ROB is a circular buffer that tracks every dispatched instruction until
//! it retires. It provides:
//! 1. **Allocation:** Records instructions in program order at dispatch.
//! 2. **Completion:** Marks instructions whose result does not live in a physical register.
//! 3. **In-order Retirement:** Exposes only the head, the oldest unretired instruction.
//! 4. **Faults:** Holds a fault until its instruction reaches the head, so faults are precise.
//! 5. **Flush:** Squashes entries younger than a branch or jump.

use crate::common::error::SimError;
use crate::common::reg::{PhysReg, SeqNum};
use crate::core::pipeline::latches::InFlight;
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::instruction::Instruction;

/// Lifecycle state of an ROB entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RobState {
    /// Entry allocated but instruction not yet finished executing.
    #[default]
    Dispatched,
    /// Execution complete, waiting to retire.
    Completed,
    /// Instruction faulted; the fault is raised when it reaches the ROB head.
    Faulted,
}

/// A single entry in the Reorder Buffer.
#[derive(Clone, Debug)]
pub struct RobEntry {
    /// Program-order ticket.
    pub seq: SeqNum,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub insn: Instruction,
    /// Control signals from decode.
    pub ctrl: ControlSignals,
    /// Renamed destination, released at retirement.
    pub dest: Option<PhysReg>,
    /// Current lifecycle state.
    pub state: RobState,
    /// Resolved redirect target for jumps.
    pub target: Option<u32>,
    /// Effective address of a store that has left the LSQ.
    pub mem_addr: Option<usize>,
    /// Fault raised when this entry reaches the head.
    pub fault: Option<SimError>,
}

impl RobEntry {
    fn from_inflight(op: &InFlight) -> Self {
        Self {
            seq: op.seq,
            pc: op.pc,
            insn: op.insn,
            ctrl: op.ctrl,
            dest: op.dest,
            state: RobState::Dispatched,
            target: None,
            mem_addr: None,
            fault: None,
        }
    }
}

/// Reorder Buffer: circular buffer for in-order retirement.
#[derive(Clone, Debug)]
pub struct Rob {
    /// Fixed-size slot array.
    entries: Vec<Option<RobEntry>>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of valid entries.
    count: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);
        Self {
            entries,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Records a dispatched instruction at the tail. Returns `false` if the ROB is full.
    pub fn allocate(&mut self, op: &InFlight) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries[self.tail] = Some(RobEntry::from_inflight(op));
        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        true
    }

    /// Marks an entry as Completed.
    pub fn complete(&mut self, seq: SeqNum) {
        if let Some(entry) = self.find_entry_mut(seq) {
            if entry.state == RobState::Dispatched {
                entry.state = RobState::Completed;
            }
        }
    }

    /// Marks a jump Completed with its resolved target.
    pub fn complete_with_target(&mut self, seq: SeqNum, target: u32) {
        if let Some(entry) = self.find_entry_mut(seq) {
            entry.target = Some(target);
            entry.state = RobState::Completed;
        }
    }

    /// Marks an entry as Faulted.
    pub fn fault(&mut self, seq: SeqNum, fault: SimError) {
        if let Some(entry) = self.find_entry_mut(seq) {
            entry.state = RobState::Faulted;
            entry.fault = Some(fault);
        }
    }

    /// Records the address a store is writing.
    pub fn set_mem_addr(&mut self, seq: SeqNum, addr: usize) {
        if let Some(entry) = self.find_entry_mut(seq) {
            entry.mem_addr = Some(addr);
        }
    }

    /// Returns a reference to the head entry (oldest), if the ROB is non-empty.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.count == 0 {
            None
        } else {
            self.entries[self.head].as_ref()
        }
    }

    /// Removes and returns the head entry; the caller has checked its retirement gate.
    pub fn pop_head(&mut self) -> Option<RobEntry> {
        if self.count == 0 {
            return None;
        }
        let entry = self.entries[self.head].take();
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        entry
    }

    /// Flushes every entry younger than `seq` and returns them, oldest first.
    ///
    /// The entry with `seq` itself is kept.
    pub fn flush_after(&mut self, seq: SeqNum) -> Vec<RobEntry> {
        let mut squashed = Vec::new();
        while self.count > 0 {
            let last = (self.tail + self.entries.len() - 1) % self.entries.len();
            match &self.entries[last] {
                Some(e) if e.seq > seq => {}
                _ => break,
            }
            if let Some(entry) = self.entries[last].take() {
                squashed.push(entry);
            }
            self.tail = last;
            self.count -= 1;
        }
        squashed.reverse();
        squashed
    }

    /// Finds a mutable reference to the entry with the given sequence number.
    fn find_entry_mut(&mut self, seq: SeqNum) -> Option<&mut RobEntry> {
        let len = self.entries.len();
        let idx = (0..self.count)
            .map(|i| (self.head + i) % len)
            .find(|&idx| self.entries[idx].as_ref().is_some_and(|e| e.seq == seq))?;
        self.entries[idx].as_mut()
    }

    /// Finds a reference to the entry with the given sequence number.
    #[cfg(test)]
    pub fn find_entry(&self, seq: SeqNum) -> Option<&RobEntry> {
        self.iter().find(|e| e.seq == seq)
    }

    /// Iterates valid entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &RobEntry> {
        let len = self.entries.len();
        (0..self.count).filter_map(move |i| self.entries[(self.head + i) % len].as_ref())
    }
}
