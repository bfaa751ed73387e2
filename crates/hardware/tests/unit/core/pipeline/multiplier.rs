//! Multiplier Pipeline Tests.
//!
//! Verifies that a product becomes visible exactly four cycles after issue
//! and that the unit accepts a new multiply every cycle.

use oosim_core::common::constants::MUL_STAGES;

use crate::common::harness::TestContext;

const PROGRAM: &str = "MOVC R1,#3\nMOVC R2,#7\nMUL R3,R1,R2\nADD R4,R3,R1\nHALT";

/// Steps until the MUL enters multiplier stage 1 and returns its destination.
fn step_until_issued(ctx: &mut TestContext) -> oosim_core::common::reg::PhysReg {
    for _ in 0..50 {
        assert!(!ctx.step().unwrap());
        if let Some(op) = &ctx.cpu().latches.mul[0] {
            return op.dest.unwrap();
        }
    }
    panic!("MUL never issued");
}

#[test]
fn result_visible_four_cycles_after_issue() {
    let mut ctx = TestContext::new(PROGRAM);
    let pd = step_until_issued(&mut ctx);

    for stage in 1..MUL_STAGES {
        assert!(!ctx.step().unwrap());
        assert!(!ctx.cpu().scoreboard.is_ready(pd), "visible after {stage} cycles");
        assert!(ctx.cpu().latches.mul[stage].is_some());
    }
    assert!(!ctx.step().unwrap());
    assert_eq!(ctx.cpu().scoreboard.read(pd), Some(21));
}

#[test]
fn dependent_issues_in_the_writeback_cycle() {
    let mut ctx = TestContext::new(PROGRAM);
    let _ = step_until_issued(&mut ctx);

    for _ in 1..MUL_STAGES {
        assert!(!ctx.step().unwrap());
        assert!(ctx.cpu().latches.int_fu.as_ref().is_none_or(|op| op.pc != 4012));
    }
    assert!(!ctx.step().unwrap());
    assert_eq!(ctx.cpu().latches.int_fu.as_ref().map(|op| op.pc), Some(4012));

    ctx.run();
    assert_eq!(ctx.reg(3), 21);
    assert_eq!(ctx.reg(4), 24);
}

#[test]
fn independent_multiplies_overlap() {
    let mut ctx = TestContext::new(
        "MOVC R0,#2\nMUL R1,R0,R0\nMUL R2,R0,R0\nMUL R3,R0,R0\nMUL R4,R0,R0\nHALT",
    );
    let mut max_busy = 0;
    while !ctx.step().unwrap() {
        let busy = ctx.cpu().latches.mul.iter().filter(|s| s.is_some()).count();
        max_busy = max_busy.max(busy);
    }
    assert!(max_busy >= 2, "multiplier never pipelined");
    assert_eq!(ctx.reg(4), 4);
}
