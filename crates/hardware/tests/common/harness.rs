use oosim_core::Simulator;
use oosim_core::common::reg::ArchReg;
use oosim_core::common::error::SimError;
use oosim_core::config::Config;
use oosim_core::core::Cpu;
use oosim_core::sim::RunOutcome;

/// Upper bound on cycles for any test program.
pub const CYCLE_LIMIT: u64 = 5_000;

pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    /// Builds a simulator on the reference machine for `source`.
    pub fn new(source: &str) -> Self {
        Self::with_config(source, &Config::default())
    }

    pub fn with_config(source: &str, config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let sim = Simulator::from_source(source, config).unwrap();
        Self { sim }
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        self.sim.cpu()
    }

    /// Mutable convenience accessor for the CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        self.sim.cpu_mut()
    }

    /// Advances one cycle and checks every invariant afterwards.
    pub fn step(&mut self) -> Result<bool, SimError> {
        let done = self.sim.advance()?;
        assert_invariants(self.sim.cpu());
        Ok(done)
    }

    /// Runs to completion, checking invariants every cycle.
    pub fn try_run(&mut self) -> Result<RunOutcome, SimError> {
        while self.sim.stats().cycles < CYCLE_LIMIT {
            if self.step()? {
                return Ok(RunOutcome::Halted);
            }
        }
        Ok(RunOutcome::CycleLimit)
    }

    /// Runs to completion and requires that the program halted cleanly.
    pub fn run(&mut self) {
        assert_eq!(self.try_run(), Ok(RunOutcome::Halted));
    }

    /// Committed value of `Rn`.
    pub fn reg(&self, n: u8) -> i32 {
        self.sim.snapshot().registers[usize::from(n)]
    }

    /// Whether `Rn` has been written by a retired instruction.
    pub fn reg_valid(&self, n: u8) -> bool {
        ArchReg::new(n).is_some_and(|r| self.cpu().regs.is_valid(r))
    }

    /// Data memory word.
    pub fn mem(&self, idx: usize) -> i32 {
        self.cpu().memory.read(idx)
    }
}

/// Checks the structural invariants that hold at every cycle boundary.
///
/// - Free registers plus distinct renamed registers equal the pool, without overlap.
/// - Every ROB destination is still renamed.
/// - IQ, ROB and LSQ occupancy stay within capacity.
/// - ROB entries are in strictly increasing program order.
pub fn assert_invariants(cpu: &Cpu) {
    let live = cpu.rename_map.live_phys();
    assert_eq!(
        cpu.free_list.len() + live.len(),
        cpu.free_list.total(),
        "free list conservation broken at cycle {}",
        cpu.stats.cycles
    );
    for p in &live {
        assert!(!cpu.free_list.contains(*p), "{p} both free and renamed");
    }
    for entry in cpu.rob.iter() {
        if let Some(d) = entry.dest {
            assert!(live.contains(&d), "ROB destination {d} not renamed");
        }
    }

    assert!(cpu.iq.len() <= cpu.iq.capacity());
    assert!(cpu.rob.len() <= cpu.rob.capacity());
    assert!(cpu.lsq.len() <= cpu.lsq.capacity());

    let seqs: Vec<_> = cpu.rob.iter().map(|e| e.seq).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]), "ROB out of order: {seqs:?}");
}
