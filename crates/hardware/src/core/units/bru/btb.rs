//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table of conditional branch outcomes keyed by
//! instruction address. It allows the fetch stage to predict a branch before
//! it is decoded. Entries move through three states:
//! 1. **Allocated:** Created inactive when decode first sees the branch.
//! 2. **Active:** Filled with the resolved outcome and target at execute.
//! 3. **Consumed:** Removed by fetch once used; a taken prediction clears the
//!    whole table so no stale redirect survives the control transfer.

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default)]
struct BtbEntry {
    /// Full branch address, used as the tag.
    tag: u32,
    /// Resolved target address.
    target: u32,
    /// Resolved direction.
    taken: bool,
    /// Set once the branch has resolved.
    active: bool,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Prediction read from an active BTB entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BtbPrediction {
    /// Predicted direction.
    pub taken: bool,
    /// Predicted target when taken.
    pub target: u32,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
    /// The total number of entries in the BTB.
    size: usize,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries in the BTB. Rounded up to a power of
    ///   two, with at least one entry.
    pub fn new(size: usize) -> Self {
        let size = size.max(1).next_power_of_two();
        Self {
            table: vec![BtbEntry::default(); size],
            size,
        }
    }

    /// Shifts the PC right by 2 bits (ignoring instruction alignment) and masks
    /// it against the table size.
    const fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.size - 1)
    }

    fn entry(&self, pc: u32) -> Option<&BtbEntry> {
        let e = &self.table[self.index(pc)];
        (e.valid && e.tag == pc).then_some(e)
    }

    /// Creates an inactive entry for a newly decoded branch.
    ///
    /// An existing entry for the same address, active or not, is kept so a
    /// resolved outcome survives re-decoding the branch.
    pub fn allocate(&mut self, pc: u32) {
        if self.entry(pc).is_some() {
            return;
        }
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: pc,
            valid: true,
            ..BtbEntry::default()
        };
    }

    /// Looks up an active prediction for the given program counter.
    ///
    /// # Returns
    ///
    /// The prediction if an active entry with a matching tag exists, otherwise `None`.
    pub fn lookup(&self, pc: u32) -> Option<BtbPrediction> {
        self.entry(pc)
            .filter(|e| e.active)
            .map(|e| BtbPrediction {
                taken: e.taken,
                target: e.target,
            })
    }

    /// Records a resolved branch outcome and activates the entry.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch.
    /// * `target` - The taken target address.
    /// * `taken` - The resolved direction.
    pub fn update(&mut self, pc: u32, target: u32, taken: bool) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: pc,
            target,
            taken,
            active: true,
            valid: true,
        };
    }

    /// Removes the entry for `pc`, if present.
    pub fn remove(&mut self, pc: u32) {
        let idx = self.index(pc);
        if self.table[idx].tag == pc {
            self.table[idx] = BtbEntry::default();
        }
    }

    /// Invalidates every entry.
    pub fn clear(&mut self) {
        self.table.fill(BtbEntry::default());
    }

    /// Number of valid entries.
    pub fn len(&self) -> usize {
        self.table.iter().filter(|e| e.valid).count()
    }

    /// Returns true if no entry is valid.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
