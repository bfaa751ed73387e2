//! Flush Tests.
//!
//! After a misprediction or a retiring JUMP no structure may hold an
//! instruction from the squashed path, and squashed registers return to the
//! free list.

use crate::common::harness::TestContext;

/// Whether any in-flight structure holds an instruction at `pc`.
fn holds_pc(ctx: &TestContext, pc: u32) -> bool {
    let cpu = ctx.cpu();
    cpu.rob.iter().any(|e| e.pc == pc)
        || cpu.iq.iter().any(|op| op.pc == pc)
        || cpu.lsq.iter().any(|e| e.op.pc == pc)
        || cpu.latches.fetch.is_some_and(|f| f.pc == pc)
        || cpu.latches.dispatch.as_ref().is_some_and(|op| op.pc == pc)
        || cpu.latches.units().any(|op| op.pc == pc)
}

#[test]
fn misprediction_clears_the_wrong_path() {
    // BZ at 4008 is taken; 4012 and 4016 are the wrong path.
    let mut ctx = TestContext::new(
        "MOVC R0,#0\nCMP R0,R0\nBZ #12\nSTORE R0,R0,#5\nMOVC R3,#1\nHALT",
    );
    ctx.cpu_mut().memory.write(5, 77);

    let mut saw_wrong_path = false;
    loop {
        let done = ctx.step().unwrap();
        if ctx.sim.stats().flushes == 0 {
            saw_wrong_path |= holds_pc(&ctx, 4012);
        } else {
            assert!(!holds_pc(&ctx, 4012));
            assert!(!holds_pc(&ctx, 4016));
        }
        if done {
            break;
        }
    }

    assert!(saw_wrong_path, "wrong path was never fetched");
    assert_eq!(ctx.mem(5), 77);
    assert!(!ctx.reg_valid(3));
    assert!(ctx.sim.stats().squashed > 0);
}

#[test]
fn jump_squashes_nothing_behind_it() {
    let mut ctx = TestContext::new("JUMP R0,#12 ; MOVC R1,#1 ; MOVC R2,#2 ; MOVC R3,#3 ; HALT");
    while !ctx.step().unwrap() {
        assert!(!holds_pc(&ctx, 4004));
        assert!(!holds_pc(&ctx, 4008));
    }
    assert!(!ctx.reg_valid(1));
    assert!(!ctx.reg_valid(2));
    assert_eq!(ctx.reg(3), 3);
    assert_eq!(ctx.sim.stats().squashed, 0);
}

#[test]
fn squashed_registers_return_to_the_pool() {
    let mut ctx = TestContext::new(
        "MOVC R0,#0\nCMP R0,R0\nBZ #24\nMOVC R1,#1\nMOVC R2,#2\nMOVC R3,#3\nMOVC R4,#4\nMOVC R5,#5\nHALT",
    );
    ctx.run();
    let cpu = ctx.cpu();
    assert_eq!(cpu.free_list.len(), cpu.free_list.total());
    assert!(cpu.rename_map.is_empty());
    assert!((1..=5).all(|r| !ctx.reg_valid(r)));
}
