//! Rename map.
//!
//! Maps architectural targets (the 16 registers and the zero flag) to the
//! physical register of their newest in-flight producer. Several bindings for
//! one target may be live at once; the most recent is authoritative. A target
//! with no live binding resolves to `None`, meaning its committed value in the
//! architectural state is current.

use crate::common::reg::{ArchReg, PhysReg, SeqNum};

/// Something an instruction can rename.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenameTarget {
    /// An architectural register.
    Gpr(ArchReg),
    /// The zero flag.
    ZeroFlag,
}

/// A live binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapEntry {
    /// Renamed target.
    pub target: RenameTarget,
    /// Physical register holding the target's in-flight value.
    pub phys: PhysReg,
    /// Instruction that created the binding.
    pub owner: SeqNum,
}

/// In-flight rename bindings, oldest first.
#[derive(Clone, Debug, Default)]
pub struct RenameMap {
    entries: Vec<MapEntry>,
}

impl RenameMap {
    /// Creates an empty map: every target resolves to architectural state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new authoritative binding for `target`.
    pub fn bind(&mut self, target: RenameTarget, phys: PhysReg, owner: SeqNum) {
        self.entries.push(MapEntry {
            target,
            phys,
            owner,
        });
    }

    /// Returns the newest binding for `target`, or `None` when no producer is in flight.
    pub fn resolve(&self, target: RenameTarget) -> Option<PhysReg> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.target == target)
            .map(|e| e.phys)
    }

    /// Drops every binding to `phys`; called when its producer retires.
    pub fn retire(&mut self, phys: PhysReg) {
        self.entries.retain(|e| e.phys != phys);
    }

    /// Drops bindings created by instructions younger than `seq` and returns
    /// their physical registers, each once, oldest first.
    pub fn squash_younger(&mut self, seq: SeqNum) -> Vec<PhysReg> {
        let mut freed = Vec::new();
        self.entries.retain(|e| {
            if e.owner > seq {
                if !freed.contains(&e.phys) {
                    freed.push(e.phys);
                }
                false
            } else {
                true
            }
        });
        freed
    }

    /// Distinct physical registers referenced by live bindings.
    pub fn live_phys(&self) -> Vec<PhysReg> {
        let mut regs: Vec<PhysReg> = self.entries.iter().map(|e| e.phys).collect();
        regs.sort_unstable();
        regs.dedup();
        regs
    }

    /// Returns true if nothing is renamed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
