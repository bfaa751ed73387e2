//! Configuration system for the pipeline simulator.
//!
//! This module defines the machine description used to parameterize a run. It provides:
//! 1. **Defaults:** The reference machine (IQ 8, ROB 16, LSQ 4, 15 physical registers).
//! 2. **Structures:** Hierarchical config for general, pipeline and memory settings.
//! 3. **Validation:** Rejection of machines that cannot make forward progress.
//!
//! Configuration is supplied as JSON (`oosim run --config machine.json`) or use
//! `Config::default()` for the reference machine.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Issue queue entries.
    pub const IQ_SIZE: usize = 8;

    /// Reorder buffer entries.
    pub const ROB_SIZE: usize = 16;

    /// Load-store queue entries.
    pub const LSQ_SIZE: usize = 4;

    /// Physical registers in the renaming pool (one fewer than the architectural count).
    pub const PHYS_REGS: usize = 15;

    /// Branch target buffer entries.
    pub const BTB_SIZE: usize = 16;

    /// Data memory size in 32-bit words.
    pub const DATA_WORDS: usize = 4096;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use oosim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.pipeline.rob_size, 16);
/// assert_eq!(config.pipeline.phys_regs, 15);
/// ```
///
/// Deserializing from JSON; omitted fields take their defaults:
///
/// ```
/// use oosim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true },
///     "pipeline": { "iq_size": 4, "phys_regs": 24 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.pipeline.iq_size, 4);
/// assert_eq!(config.pipeline.lsq_size, 4);
/// assert_eq!(config.memory.data_words, 4096);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Out-of-order structure sizes
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error reported
    /// by [`Config::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the machine can make forward progress.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] when any queue, the register pool or
    /// the data memory is empty, and [`ConfigError::BtbSize`] when the BTB size
    /// is not a power of two.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pipeline;
        for (name, size) in [
            ("iq_size", p.iq_size),
            ("rob_size", p.rob_size),
            ("lsq_size", p.lsq_size),
            ("phys_regs", p.phys_regs),
            ("data_words", self.memory.data_words),
        ] {
            if size == 0 {
                return Err(ConfigError::ZeroCapacity(name));
            }
        }
        if !p.btb_size.is_power_of_two() {
            return Err(ConfigError::BtbSize(p.btb_size));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a per-stage trace line for every occupied stage each cycle
    #[serde(default)]
    pub trace: bool,

    /// Stop after this many cycles even if HALT never retires
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Sizes of the out-of-order structures.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Issue queue capacity
    #[serde(default = "PipelineConfig::default_iq_size")]
    pub iq_size: usize,

    /// Reorder buffer capacity
    #[serde(default = "PipelineConfig::default_rob_size")]
    pub rob_size: usize,

    /// Load-store queue capacity
    #[serde(default = "PipelineConfig::default_lsq_size")]
    pub lsq_size: usize,

    /// Physical registers available for renaming
    #[serde(default = "PipelineConfig::default_phys_regs")]
    pub phys_regs: usize,

    /// Branch Target Buffer size
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,
}

impl PipelineConfig {
    fn default_iq_size() -> usize {
        defaults::IQ_SIZE
    }

    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    fn default_lsq_size() -> usize {
        defaults::LSQ_SIZE
    }

    fn default_phys_regs() -> usize {
        defaults::PHYS_REGS
    }

    /// Returns the default Branch Target Buffer size.
    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }
}

impl Default for PipelineConfig {
    /// Creates the reference machine: IQ 8, ROB 16, LSQ 4, 15 physical registers.
    fn default() -> Self {
        Self {
            iq_size: defaults::IQ_SIZE,
            rob_size: defaults::ROB_SIZE,
            lsq_size: defaults::LSQ_SIZE,
            phys_regs: defaults::PHYS_REGS,
            btb_size: defaults::BTB_SIZE,
        }
    }
}

/// Flat data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Number of addressable 32-bit words
    #[serde(default = "MemoryConfig::default_data_words")]
    pub data_words: usize,
}

impl MemoryConfig {
    fn default_data_words() -> usize {
        defaults::DATA_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: defaults::DATA_WORDS,
        }
    }
}
