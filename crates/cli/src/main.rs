//! Out-of-order pipeline simulator CLI.
//!
//! This binary loads an assembly program and runs it on the simulated machine. It performs:
//! 1. **Configuration:** Built-in reference machine, or a JSON machine description via `--config`.
//! 2. **Run control:** Free running, a cycle limit, or interactive single-stepping.
//! 3. **Reporting:** Per-stage trace, final register file and memory, and statistics.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use oosim_core::common::error::SimError;
use oosim_core::config::Config;
use oosim_core::core::pipeline::traits::{Stage, TraceSink};
use oosim_core::isa::Instruction;
use oosim_core::sim::loader;
use oosim_core::sim::{RunOutcome, Simulator};
use oosim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "oosim",
    author,
    version,
    about = "Cycle-level out-of-order pipeline simulator",
    long_about = "Run an assembly program on an out-of-order core with register renaming, \
                  an issue queue, a reorder buffer and a load-store queue.\n\n\
                  Examples:\n  oosim run programs/loop.asm\n  \
                  oosim run programs/loop.asm --trace --max-cycles 200\n  \
                  oosim run programs/loop.asm --config wide.json --stats summary branch"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until HALT retires, the cycle limit, or a fault.
    Run {
        /// Assembly source file.
        program: PathBuf,

        /// JSON machine description; omitted fields take the reference values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many cycles.
        #[arg(short, long)]
        max_cycles: Option<u64>,

        /// Print the contents of every occupied stage each cycle.
        #[arg(short, long)]
        trace: bool,

        /// Pause after every cycle and wait for a command on stdin.
        #[arg(short, long)]
        step: bool,

        /// Statistics sections to print (default: all).
        #[arg(long, num_args = 1.., value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS))]
        stats: Vec<String>,
    },
}

/// Trace sink printing one block per cycle to stdout.
#[derive(Debug, Default)]
struct StdoutTrace {
    cycle: u64,
}

impl TraceSink for StdoutTrace {
    fn on_stage(&mut self, cycle: u64, stage: Stage, pc: u32, insn: &Instruction) {
        if cycle != self.cycle {
            self.cycle = cycle;
            println!("------------------ cycle {cycle} ------------------");
        }
        println!("  {:<12} ({pc}) {insn}", stage.to_string());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let Commands::Run {
        program,
        config,
        max_cycles,
        trace,
        step,
        stats,
    } = cli.command;

    match cmd_run(&program, config.as_deref(), max_cycles, trace, step) {
        Ok(sim) => {
            sim.cpu().dump_state();
            sim.stats().print_sections(&stats);
        }
        Err(e) => {
            error!(%e, "run failed");
            eprintln!("\n[!] {e}");
            process::exit(1);
        }
    }
}

/// Reads and validates a JSON machine description.
fn read_config(path: &Path) -> Result<Config, String> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Config::from_json(&text).map_err(|e| e.to_string())
}

/// Builds the simulator and runs it to completion.
///
/// On a fault the machine state is dumped before the error is returned, so the
/// caller only has to report it.
///
/// # Errors
///
/// Returns a printable message for unreadable input, an invalid machine or
/// program, or a fault raised at commit.
fn cmd_run(
    program: &Path,
    config: Option<&Path>,
    max_cycles: Option<u64>,
    trace: bool,
    step: bool,
) -> Result<Simulator, String> {
    let config = match config {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };
    let max_cycles = max_cycles.or(config.general.max_cycles);

    let program = loader::load_program(program).map_err(|e| SimError::from(e).to_string())?;
    println!(
        "[*] {} instructions, iq={} rob={} lsq={} phys_regs={}",
        program.len(),
        config.pipeline.iq_size,
        config.pipeline.rob_size,
        config.pipeline.lsq_size,
        config.pipeline.phys_regs
    );

    let mut sim = Simulator::new(program, &config).map_err(|e| e.to_string())?;
    if trace {
        sim = sim.with_trace(Box::new(StdoutTrace::default()));
    }

    let result = if step {
        step_loop(&mut sim, max_cycles)
    } else {
        sim.run(max_cycles, |_| false)
    };

    match result {
        Ok(RunOutcome::Halted) => println!("\n[*] HALT retired"),
        Ok(RunOutcome::CycleLimit) => println!("\n[*] cycle limit reached"),
        Ok(RunOutcome::Stopped) => println!("\n[*] stopped"),
        Err(e) => {
            sim.cpu().dump_state();
            sim.stats().print_sections(&[]);
            return Err(e.to_string());
        }
    }
    Ok(sim)
}

/// Advances one cycle per command read from stdin.
///
/// Commands: empty line steps, `d` dumps the machine state, `c` runs to the
/// end without stopping, `q` quits.
fn step_loop(sim: &mut Simulator, max_cycles: Option<u64>) -> Result<RunOutcome, SimError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if sim.advance()? {
            return Ok(RunOutcome::Halted);
        }
        let cycles = sim.stats().cycles;
        if max_cycles.is_some_and(|max| cycles >= max) {
            return Ok(RunOutcome::CycleLimit);
        }

        loop {
            print!("[cycle {cycles}] (enter=step, d=dump, c=continue, q=quit) > ");
            let _ = io::stdout().flush();
            let Some(Ok(line)) = lines.next() else {
                return Ok(RunOutcome::Stopped);
            };
            match line.trim() {
                "" | "s" => break,
                "d" => sim.cpu().dump_state(),
                "c" => {
                    debug!(cycles, "leaving step mode");
                    return sim.run(max_cycles, |_| false);
                }
                "q" => return Ok(RunOutcome::Stopped),
                other => println!("unknown command `{other}`"),
            }
        }
    }
}
