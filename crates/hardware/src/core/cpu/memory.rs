//! Flat data memory.
//!
//! This module models the single-cycle data memory behind the data-cache stage.
//! It performs the following:
//! 1. **Addressing:** Word-addressed storage; an effective address is a word index.
//! 2. **Range Checking:** Rejects effective addresses outside the configured size.
//! 3. **Ordering:** Keeps a readiness bit per word, cleared while a store to it is in flight.

/// Word-addressed data memory with per-word readiness bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
    ready: Vec<bool>,
}

impl DataMemory {
    /// Creates a zeroed memory of `size` words, all ready.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
            ready: vec![true; size],
        }
    }

    /// Converts an effective address into a word index, or `None` if out of range.
    pub fn translate(&self, addr: i64) -> Option<usize> {
        usize::try_from(addr).ok().filter(|&a| a < self.words.len())
    }

    /// Reads a word.
    #[inline]
    pub fn read(&self, idx: usize) -> i32 {
        self.words[idx]
    }

    /// Writes a word.
    #[inline]
    pub fn write(&mut self, idx: usize, val: i32) {
        self.words[idx] = val;
    }

    /// Returns false while a store to this word is between the LSQ and the data cache.
    #[inline]
    pub fn is_ready(&self, idx: usize) -> bool {
        self.ready[idx]
    }

    /// Sets the readiness bit of a word.
    #[inline]
    pub fn set_ready(&mut self, idx: usize, ready: bool) {
        self.ready[idx] = ready;
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true for a zero-sized memory.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The full memory contents.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Prints every nonzero word.
    pub fn dump(&self) {
        for (addr, val) in self.words.iter().enumerate().filter(|(_, v)| **v != 0) {
            println!("  MEM[{addr:<4}] = {val}");
        }
    }
}
