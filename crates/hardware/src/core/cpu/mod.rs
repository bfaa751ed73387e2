//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the entire
//! machine state. It coordinates the following:
//! 1. **Architectural State:** Committed registers, zero flag, program counter and data memory.
//! 2. **Renaming State:** Free list, rename map and physical register scoreboard.
//! 3. **Out-of-order Structures:** ROB, issue queue, load-store queue and BTB.
//! 4. **Pipeline Control:** Stage latches, fetch gating flags and statistics.

/// Flat data memory with per-word readiness.
pub mod memory;

use crate::common::constants::{CODE_BASE, NUM_ARCH_REGS};
use crate::common::reg::SeqNum;
use crate::config::Config;
use crate::core::arch::Gpr;
use crate::core::pipeline::free_list::FreeList;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::lsq::LoadStoreQueue;
use crate::core::pipeline::rename_map::RenameMap;
use crate::core::pipeline::rob::Rob;
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::units::bru::Btb;
use crate::isa::instruction::Program;
use crate::stats::SimStats;

pub use self::memory::DataMemory;

/// Architectural state visible to the program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchSnapshot {
    /// Register values `R0`..`R15`.
    pub registers: [i32; NUM_ARCH_REGS],
    /// Whether each register has been written by a retired instruction.
    pub valid: [bool; NUM_ARCH_REGS],
    /// Committed zero flag.
    pub zero_flag: i32,
    /// Data memory contents.
    pub memory: Vec<i32>,
}

/// Main CPU structure containing all processor state.
///
/// Everything a cycle reads or writes lives here, so independent simulations
/// never share state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Committed registers and zero flag.
    pub regs: Gpr,
    /// Address of the next instruction to fetch.
    pub pc: u32,
    /// Data memory.
    pub memory: DataMemory,
    /// Instruction stream.
    pub program: Program,

    /// Unallocated physical registers.
    pub free_list: FreeList,
    /// Architectural target to physical register bindings.
    pub rename_map: RenameMap,
    /// Physical register readiness and values.
    pub scoreboard: Scoreboard,
    /// Reorder buffer.
    pub rob: Rob,
    /// Issue queue.
    pub iq: IssueQueue,
    /// Load-store queue.
    pub lsq: LoadStoreQueue,
    /// Branch target buffer.
    pub btb: Btb,
    /// Stage latches and unit registers.
    pub latches: Latches,

    /// Sequence number given to the next fetched instruction.
    pub next_seq: SeqNum,
    /// A decoded JUMP has not retired yet; fetch waits for its redirect.
    pub jump_in_flight: bool,
    /// A HALT has been fetched; nothing after it is fetched.
    pub fetch_halted: bool,
    /// HALT retired; the run is over.
    pub done: bool,

    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU at reset for the given program.
    ///
    /// # Arguments
    ///
    /// * `program` - The instruction stream, laid out from the code base.
    /// * `config` - Structure sizes, already checked by [`Config::validate`].
    pub(crate) fn new(program: Program, config: &Config) -> Self {
        let p = &config.pipeline;
        Self {
            regs: Gpr::new(),
            pc: CODE_BASE,
            memory: DataMemory::new(config.memory.data_words),
            program,
            free_list: FreeList::new(p.phys_regs),
            rename_map: RenameMap::new(),
            scoreboard: Scoreboard::new(p.phys_regs),
            rob: Rob::new(p.rob_size),
            iq: IssueQueue::new(p.iq_size),
            lsq: LoadStoreQueue::new(p.lsq_size),
            btb: Btb::new(p.btb_size),
            latches: Latches::default(),
            next_seq: SeqNum(1),
            jump_in_flight: false,
            fetch_halted: false,
            done: false,
            stats: SimStats::default(),
        }
    }

    /// Copies out the architectural state.
    pub fn snapshot(&self) -> ArchSnapshot {
        ArchSnapshot {
            registers: self.regs.values(),
            valid: self.regs.valid_bits(),
            zero_flag: self.regs.zero_flag(),
            memory: self.memory.words().to_vec(),
        }
    }

    /// Returns true when no instruction is anywhere in the pipeline.
    pub fn pipeline_empty(&self) -> bool {
        self.rob.is_empty() && self.iq.is_empty() && self.lsq.is_empty() && self.latches.is_empty()
    }

    /// Returns true when fetch has run past the last instruction.
    pub fn fetch_exhausted(&self) -> bool {
        self.program.lookup(self.pc).is_none()
    }

    /// Prints registers, nonzero memory and occupancy to stdout.
    pub fn dump_state(&self) {
        println!("=============== REGISTER FILE ===============");
        self.regs.dump();
        println!("=============== DATA MEMORY =================");
        self.memory.dump();
        println!("=============== OCCUPANCY ===================");
        println!(
            "  pc={} rob={}/{} iq={}/{} lsq={}/{} free={}/{}",
            self.pc,
            self.rob.len(),
            self.rob.capacity(),
            self.iq.len(),
            self.iq.capacity(),
            self.lsq.len(),
            self.lsq.capacity(),
            self.free_list.len(),
            self.free_list.total()
        );
    }
}
