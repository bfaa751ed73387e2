//! Fault Tests.
//!
//! Faults are recorded against the ROB entry and raised only when it reaches
//! the head, so a fault on a squashed path never surfaces.

use oosim_core::common::error::SimError;
use oosim_core::config::Config;
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

#[test]
fn divide_by_zero_stops_at_commit() {
    let mut ctx = TestContext::new("MOVC R0,#1 ; MOVC R1,#0 ; DIV R2,R0,R1 ; MOVC R3,#4 ; HALT");
    assert_eq!(ctx.try_run(), Err(SimError::DivideByZero { pc: 4008 }));

    // Older instructions retired; the faulting one and younger did not.
    assert_eq!(ctx.reg(0), 1);
    assert!(!ctx.reg_valid(2));
    assert!(!ctx.reg_valid(3));
}

#[test]
fn wrong_path_divide_is_squashed() {
    let mut ctx = TestContext::new(
        "MOVC R0,#0 ; MOVC R1,#0 ; CMP R0,R1 ; BZ #8 ; DIV R2,R0,R1 ; HALT",
    );
    ctx.run();
    assert!(!ctx.reg_valid(2));
}

#[test]
fn load_outside_memory_faults() {
    let mut config = Config::default();
    config.memory.data_words = 64;
    let mut ctx = TestContext::with_config("MOVC R1,#60 ; LOAD R2,R1,#8 ; HALT", &config);
    assert_eq!(
        ctx.try_run(),
        Err(SimError::AddressOutOfRange { pc: 4004, addr: 68 })
    );
}

#[test]
fn negative_store_address_faults() {
    let mut ctx = TestContext::new("MOVC R0,#5 ; MOVC R1,#-3 ; STORE R0,R1,#1 ; HALT");
    assert_eq!(
        ctx.try_run(),
        Err(SimError::AddressOutOfRange { pc: 4008, addr: -2 })
    );
}
