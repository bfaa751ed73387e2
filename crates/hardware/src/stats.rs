//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI).
//! 2. **Instruction mix:** Retired counts by class (ALU, multiply, logical, load, store, control).
//! 3. **Branch prediction:** Resolved branches, mispredictions, and accuracy.
//! 4. **Stalls and flushes:** Backpressure cycles per structure and recovery events.

use std::time::Instant;

use crate::core::pipeline::signals::{ControlSignals, FuncUnit, MemOp};

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired, HALT included.
    pub instructions_retired: u64,

    /// Integer-unit arithmetic instructions retired (MOVC, ADD, SUB, DIV, ADDL, SUBL, CMP).
    pub inst_alu: u64,
    /// Multiplies retired.
    pub inst_mul: u64,
    /// Logical instructions retired.
    pub inst_logical: u64,
    /// Loads retired.
    pub inst_load: u64,
    /// Stores retired.
    pub inst_store: u64,
    /// Branches and jumps retired.
    pub inst_branch: u64,
    /// HALT and NOP retired.
    pub inst_other: u64,

    /// Conditional branches whose prediction matched the outcome.
    pub branch_predictions: u64,
    /// Conditional branches that were mispredicted.
    pub branch_mispredictions: u64,
    /// Flushes performed (mispredictions and jumps).
    pub flushes: u64,
    /// Wrong-path instructions removed by flushes.
    pub squashed: u64,

    /// Cycles decode stalled on an empty free list.
    pub stalls_rename: u64,
    /// Cycles dispatch stalled on a full ROB.
    pub stalls_rob: u64,
    /// Cycles dispatch stalled on a full IQ.
    pub stalls_iq: u64,
    /// Cycles dispatch stalled on a full LSQ.
    pub stalls_lsq: u64,
    /// Cycles the ROB head could not retire.
    pub stalls_commit: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_mul: 0,
            inst_logical: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_other: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            flushes: 0,
            squashed: 0,
            stalls_rename: 0,
            stalls_rob: 0,
            stalls_iq: 0,
            stalls_lsq: 0,
            stalls_commit: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"instruction_mix"`, `"branch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "branch"];

impl SimStats {
    /// Counts one retired instruction in the instruction mix.
    pub fn record_retire(&mut self, ctrl: &ControlSignals) {
        self.instructions_retired += 1;
        match (ctrl.mem, ctrl.unit) {
            (MemOp::Load, _) => self.inst_load += 1,
            (MemOp::Store, _) => self.inst_store += 1,
            _ if ctrl.branch || ctrl.jump => self.inst_branch += 1,
            (_, Some(FuncUnit::Multiplier)) => self.inst_mul += 1,
            (_, Some(FuncUnit::Logical)) => self.inst_logical += 1,
            (_, Some(FuncUnit::Integer)) => self.inst_alu += 1,
            (_, None) => self.inst_other += 1,
        }
    }

    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"core"`,
    /// `"instruction_mix"` or `"branch"`. Pass an empty slice to print all
    /// sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", cyc / instr);
            println!("----------------------------------------------------------");
        }
        if want("core") {
            println!("CORE BREAKDOWN");
            for (name, n) in [
                ("stalls.rename", self.stalls_rename),
                ("stalls.rob", self.stalls_rob),
                ("stalls.iq", self.stalls_iq),
                ("stalls.lsq", self.stalls_lsq),
                ("stalls.commit", self.stalls_commit),
            ] {
                println!("  {name:<22} {n} ({:.2}%)", pct(n, cyc));
            }
            println!("  {:<22} {}", "flushes", self.flushes);
            println!("  {:<22} {}", "squashed", self.squashed);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.mul", self.inst_mul),
                ("op.logical", self.inst_logical),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.other", self.inst_other),
            ] {
                println!("  {name:<22} {n} ({:.2}%)", pct(n, instr));
            }
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            let total = self.branch_predictions + self.branch_mispredictions;
            let acc = if total > 0 {
                pct(self.branch_predictions, total as f64)
            } else {
                0.0
            };
            println!("BRANCH PREDICTION");
            println!("  bp.resolved            {total}");
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.accuracy            {acc:.2}%");
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
