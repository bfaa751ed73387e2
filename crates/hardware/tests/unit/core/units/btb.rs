//! Branch Target Buffer Tests.
//!
//! Verifies the allocate / activate / consume lifecycle, tag matching and
//! direct-mapped aliasing.

use oosim_core::core::units::bru::{Btb, BtbPrediction};

// ══════════════════════════════════════════════════════════
// 1. Lifecycle
// ══════════════════════════════════════════════════════════

#[test]
fn allocated_entry_does_not_predict() {
    let mut btb = Btb::new(16);
    btb.allocate(4008);
    assert_eq!(btb.len(), 1);
    assert_eq!(btb.lookup(4008), None);
}

#[test]
fn update_activates() {
    let mut btb = Btb::new(16);
    btb.allocate(4008);
    btb.update(4008, 4000, true);
    assert_eq!(
        btb.lookup(4008),
        Some(BtbPrediction {
            taken: true,
            target: 4000
        })
    );
}

#[test]
fn allocate_keeps_a_resolved_entry() {
    let mut btb = Btb::new(16);
    btb.update(4008, 4020, false);
    btb.allocate(4008);
    assert_eq!(btb.lookup(4008).map(|p| p.taken), Some(false));
}

#[test]
fn remove_and_clear() {
    let mut btb = Btb::new(16);
    btb.update(4000, 4100, true);
    btb.update(4004, 4100, false);
    btb.remove(4004);
    assert_eq!(btb.lookup(4004), None);
    assert_eq!(btb.len(), 1);

    btb.clear();
    assert!(btb.is_empty());
}

// ══════════════════════════════════════════════════════════
// 2. Indexing
// ══════════════════════════════════════════════════════════

#[test]
fn aliasing_pcs_evict_each_other() {
    let mut btb = Btb::new(4);
    // 4000 and 4016 share index (pc >> 2) & 3.
    btb.update(4000, 4100, true);
    btb.update(4016, 4200, true);
    assert_eq!(btb.lookup(4000), None);
    assert_eq!(btb.lookup(4016).map(|p| p.target), Some(4200));
}

#[test]
fn remove_ignores_a_different_tag() {
    let mut btb = Btb::new(4);
    btb.update(4000, 4100, true);
    btb.remove(4016);
    assert!(btb.lookup(4000).is_some());
}

#[test]
fn zero_size_keeps_one_entry() {
    let mut btb = Btb::new(0);
    btb.update(4000, 4100, true);
    assert_eq!(btb.lookup(4000).map(|p| p.target), Some(4100));
    btb.update(4004, 4200, false);
    assert_eq!(btb.lookup(4000), None);
    assert_eq!(btb.lookup(4004).map(|p| p.taken), Some(false));
}

#[test]
fn size_rounds_up_to_power_of_two() {
    // Six entries index like eight, so 4000 and 4016 no longer collide.
    let mut btb = Btb::new(6);
    btb.update(4000, 4100, true);
    btb.update(4016, 4200, true);
    assert_eq!(btb.lookup(4000).map(|p| p.target), Some(4100));
    assert_eq!(btb.lookup(4016).map(|p| p.target), Some(4200));
}
