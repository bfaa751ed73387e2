//! Out-of-Order Structure Tests.
//!
//! Exercises the ROB, issue queue and load-store queue directly through their
//! public interfaces.

use oosim_core::common::error::SimError;
use oosim_core::common::reg::{PhysReg, SeqNum};
use oosim_core::core::pipeline::issue_queue::IssueQueue;
use oosim_core::core::pipeline::latches::{FetchEntry, InFlight, Operand};
use oosim_core::core::pipeline::lsq::{LoadStoreQueue, LsqAddress};
use oosim_core::core::pipeline::rob::{Rob, RobState};
use oosim_core::core::pipeline::scoreboard::Scoreboard;
use oosim_core::core::pipeline::signals::FuncUnit;
use oosim_core::isa::decode::parse_instruction;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn op(seq: u64, text: &str) -> InFlight {
    InFlight::new(&FetchEntry {
        seq: SeqNum(seq),
        pc: 4000 + 4 * seq as u32,
        insn: parse_instruction(text, 1).unwrap(),
        predicted_taken: false,
    })
}

fn waiting_on(seq: u64, text: &str, phys: PhysReg) -> InFlight {
    let mut o = op(seq, text);
    o.src1 = Some(Operand::Phys(phys));
    o.src2 = Some(Operand::Value(1));
    o
}

// ══════════════════════════════════════════════════════════
// 1. Reorder buffer
// ══════════════════════════════════════════════════════════

#[test]
fn rob_wraps_and_keeps_order() {
    let mut rob = Rob::new(3);
    for s in 1..=3 {
        assert!(rob.allocate(&op(s, "NOP")));
    }
    assert!(!rob.allocate(&op(4, "NOP")));

    assert_eq!(rob.pop_head().map(|e| e.seq), Some(SeqNum(1)));
    assert!(rob.allocate(&op(4, "NOP")));
    let order: Vec<_> = rob.iter().map(|e| e.seq.0).collect();
    assert_eq!(order, vec![2, 3, 4]);
}

#[test]
fn rob_flush_keeps_the_redirecting_entry() {
    let mut rob = Rob::new(8);
    for s in 1..=5 {
        assert!(rob.allocate(&op(s, "NOP")));
    }
    let flushed: Vec<_> = rob.flush_after(SeqNum(2)).iter().map(|e| e.seq.0).collect();
    assert_eq!(flushed, vec![3, 4, 5]);
    assert_eq!(rob.len(), 2);
    assert!(rob.allocate(&op(6, "NOP")));
    assert_eq!(rob.iter().last().map(|e| e.seq), Some(SeqNum(6)));
}

#[test]
fn rob_fault_is_sticky() {
    let mut rob = Rob::new(4);
    assert!(rob.allocate(&op(1, "DIV R1,R2,R3")));
    rob.fault(SeqNum(1), SimError::DivideByZero { pc: 4004 });
    rob.complete(SeqNum(1));

    let head = rob.peek_head().unwrap();
    assert_eq!(head.state, RobState::Faulted);
    assert_eq!(head.fault, Some(SimError::DivideByZero { pc: 4004 }));
}

// ══════════════════════════════════════════════════════════
// 2. Issue queue
// ══════════════════════════════════════════════════════════

#[test]
fn iq_selects_first_ready_for_the_unit() {
    let mut sb = Scoreboard::new(4);
    sb.mark_pending(PhysReg(0));

    let mut iq = IssueQueue::new(4);
    assert!(iq.insert(waiting_on(1, "ADD R1,R2,R3", PhysReg(0))));
    assert!(iq.insert(op(2, "AND R1,R2,R3")));
    assert!(iq.insert(op(3, "ADD R4,R2,R3")));
    assert!(iq.insert(op(4, "ADD R5,R2,R3")));
    assert!(iq.is_full());

    assert_eq!(iq.select(FuncUnit::Integer, &sb).map(|o| o.seq), Some(SeqNum(3)));
    assert_eq!(iq.select(FuncUnit::Multiplier, &sb).map(|o| o.seq), None);

    sb.publish(PhysReg(0), 8);
    assert_eq!(iq.select(FuncUnit::Integer, &sb).map(|o| o.seq), Some(SeqNum(1)));
}

#[test]
fn iq_capture_replaces_a_freed_register() {
    let mut sb = Scoreboard::new(2);
    sb.mark_pending(PhysReg(1));
    let mut iq = IssueQueue::new(2);
    assert!(iq.insert(waiting_on(1, "MUL R1,R2,R3", PhysReg(1))));

    iq.capture(PhysReg(1), 6);
    let selected = iq.select(FuncUnit::Multiplier, &sb).unwrap();
    assert_eq!(selected.src1, Some(Operand::Value(6)));
}

#[test]
fn iq_squash_and_purge() {
    let mut iq = IssueQueue::new(8);
    for s in 1..=4 {
        assert!(iq.insert(op(s, "ADD R1,R2,R3")));
    }
    assert!(iq.insert(op(5, "HALT")));

    assert_eq!(iq.purge_unissuable().len(), 1);
    let squashed: Vec<_> = iq.squash_younger(SeqNum(2)).iter().map(|o| o.seq.0).collect();
    assert_eq!(squashed, vec![3, 4]);
    assert_eq!(iq.len(), 2);
}

#[test]
fn stores_issue_without_their_data() {
    let sb = {
        let mut sb = Scoreboard::new(2);
        sb.mark_pending(PhysReg(0));
        sb
    };
    let store = waiting_on(1, "STORE R1,R2,#4", PhysReg(0));
    assert!(store.issue_ready(&sb));

    let add = waiting_on(2, "ADD R1,R2,R3", PhysReg(0));
    assert!(!add.issue_ready(&sb));
}

// ══════════════════════════════════════════════════════════
// 3. Load-store queue
// ══════════════════════════════════════════════════════════

#[test]
fn lsq_is_fifo_with_late_addresses() {
    let mut lsq = LoadStoreQueue::new(2);
    assert!(lsq.push(op(1, "LOAD R1,R2,#0")));
    assert!(lsq.push(op(2, "STORE R1,R2,#0")));
    assert!(!lsq.push(op(3, "LOAD R1,R2,#0")));

    lsq.set_address(SeqNum(2), LsqAddress::Ready(7));
    assert_eq!(lsq.head().map(|e| e.addr), Some(LsqAddress::Pending));

    lsq.set_address(SeqNum(1), LsqAddress::Faulted);
    assert_eq!(lsq.pop_head().map(|e| e.addr), Some(LsqAddress::Faulted));
    assert_eq!(lsq.head().map(|e| e.addr), Some(LsqAddress::Ready(7)));
}

#[test]
fn lsq_squash_removes_only_younger() {
    let mut lsq = LoadStoreQueue::new(4);
    for s in [2, 5, 9] {
        assert!(lsq.push(op(s, "LOAD R1,R2,#0")));
    }
    assert_eq!(lsq.squash_younger(SeqNum(5)).len(), 1);
    let left: Vec<_> = lsq.iter().map(|e| e.op.seq.0).collect();
    assert_eq!(left, vec![2, 5]);
}
