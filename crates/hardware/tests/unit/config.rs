//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization and validation.

use oosim_core::common::error::{ConfigError, SimError};
use oosim_core::config::*;
use oosim_core::Simulator;
use pretty_assertions::assert_eq;

#[test]
fn test_config_default_is_the_reference_machine() {
    let config = Config::default();
    assert_eq!(config.pipeline.iq_size, 8);
    assert_eq!(config.pipeline.rob_size, 16);
    assert_eq!(config.pipeline.lsq_size, 4);
    assert_eq!(config.pipeline.phys_regs, 15);
    assert_eq!(config.pipeline.btb_size, 16);
    assert_eq!(config.memory.data_words, 4096);
    assert!(!config.general.trace);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = Config::from_json(r#"{ "pipeline": { "rob_size": 32 } }"#).unwrap();
    assert_eq!(config.pipeline.rob_size, 32);
    assert_eq!(config.pipeline.iq_size, 8);
    assert_eq!(config.memory.data_words, 4096);
}

#[test]
fn test_empty_json_object() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.pipeline.phys_regs, 15);
}

#[test]
fn test_general_section() {
    let config =
        Config::from_json(r#"{ "general": { "trace": true, "max_cycles": 500 } }"#).unwrap();
    assert!(config.general.trace);
    assert_eq!(config.general.max_cycles, Some(500));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    assert!(matches!(
        Config::from_json(r#"{ "pipeline": { "iq_size": "eight" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_zero_capacities_rejected() {
    for field in ["iq_size", "rob_size", "lsq_size", "phys_regs"] {
        let json = format!(r#"{{ "pipeline": {{ "{field}": 0 }} }}"#);
        assert_eq!(Config::from_json(&json).unwrap_err(), ConfigError::ZeroCapacity(field));
    }
    assert_eq!(
        Config::from_json(r#"{ "memory": { "data_words": 0 } }"#).unwrap_err(),
        ConfigError::ZeroCapacity("data_words")
    );
}

#[test]
fn test_btb_size_must_be_power_of_two() {
    assert_eq!(
        Config::from_json(r#"{ "pipeline": { "btb_size": 12 } }"#).unwrap_err(),
        ConfigError::BtbSize(12)
    );
    assert!(Config::from_json(r#"{ "pipeline": { "btb_size": 1 } }"#).is_ok());
    assert_eq!(
        Config::from_json(r#"{ "pipeline": { "btb_size": 0 } }"#).unwrap_err(),
        ConfigError::BtbSize(0)
    );
}

#[test]
fn test_simulator_rejects_invalid_config() {
    let mut config = Config::default();
    config.pipeline.rob_size = 0;
    assert_eq!(
        Simulator::from_source("HALT", &config).unwrap_err(),
        SimError::InvalidConfig(ConfigError::ZeroCapacity("rob_size"))
    );

    let mut config = Config::default();
    config.pipeline.btb_size = 0;
    assert_eq!(
        Simulator::from_source("HALT", &config).unwrap_err(),
        SimError::InvalidConfig(ConfigError::BtbSize(0))
    );
}
