//! Simulator: owns the CPU and drives it one cycle at a time.
//!
//! The simulator is the only entry point the front ends need. It validates the
//! configuration, builds the machine, optionally forwards per-stage records to
//! a [`TraceSink`], and runs until HALT retires, a cycle limit is reached or the
//! caller asks to stop.

use std::fmt;

use tracing::info;

use crate::common::error::{ProgramError, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::ArchSnapshot;
use crate::core::pipeline::engine;
use crate::core::pipeline::traits::{LogTrace, TraceSink};
use crate::isa::instruction::Program;
use crate::sim::loader::parse_program;
use crate::stats::SimStats;

/// Why [`Simulator::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// HALT retired, or the program drained without one.
    Halted,
    /// The cycle limit was reached first.
    CycleLimit,
    /// The caller's stop predicate returned true.
    Stopped,
}

/// Top-level simulator: the CPU plus an optional trace observer.
pub struct Simulator {
    cpu: Cpu,
    trace: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cycle", &self.cpu.stats.cycles)
            .field("pc", &self.cpu.pc)
            .field("done", &self.cpu.done)
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

impl Simulator {
    /// Creates a simulator for `program` on the machine described by `config`.
    ///
    /// A config with `general.trace` set gets a [`LogTrace`] sink.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] for an unusable machine and
    /// [`SimError::InvalidProgram`] for an empty program.
    pub fn new(program: Program, config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        if program.is_empty() {
            return Err(ProgramError::Empty.into());
        }
        let trace: Option<Box<dyn TraceSink>> = if config.general.trace {
            Some(Box::new(LogTrace))
        } else {
            None
        };
        Ok(Self {
            cpu: Cpu::new(program, config),
            trace,
        })
    }

    /// Parses assembly source and creates a simulator for it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidProgram`] when the source does not parse, and
    /// anything [`Simulator::new`] rejects.
    pub fn from_source(source: &str, config: &Config) -> Result<Self, SimError> {
        Self::new(parse_program(source)?, config)
    }

    /// Replaces the trace sink.
    #[must_use]
    pub fn with_trace(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Returns
    ///
    /// `true` once the run is complete; further calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns the fault of a faulted instruction that reached the ROB head.
    pub fn advance(&mut self) -> Result<bool, SimError> {
        engine::tick(&mut self.cpu, self.trace.as_deref_mut())
    }

    /// Runs until completion, the cycle limit, or `should_stop` returns true.
    ///
    /// `should_stop` is consulted after every cycle with the number of cycles
    /// executed so far.
    ///
    /// # Errors
    ///
    /// Propagates any fault from [`Simulator::advance`].
    pub fn run(
        &mut self,
        max_cycles: Option<u64>,
        mut should_stop: impl FnMut(u64) -> bool,
    ) -> Result<RunOutcome, SimError> {
        loop {
            if self.advance()? {
                info!(
                    cycles = self.cpu.stats.cycles,
                    retired = self.cpu.stats.instructions_retired,
                    "simulation complete"
                );
                return Ok(RunOutcome::Halted);
            }
            let cycles = self.cpu.stats.cycles;
            if max_cycles.is_some_and(|max| cycles >= max) {
                return Ok(RunOutcome::CycleLimit);
            }
            if should_stop(cycles) {
                return Ok(RunOutcome::Stopped);
            }
        }
    }

    /// Copies out the architectural registers, zero flag and memory.
    pub fn snapshot(&self) -> ArchSnapshot {
        self.cpu.snapshot()
    }

    /// Whether the run is complete.
    pub const fn is_done(&self) -> bool {
        self.cpu.done
    }

    /// The machine, for inspection.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The machine, for tests and tools that preload state.
    pub const fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Performance statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }
}
