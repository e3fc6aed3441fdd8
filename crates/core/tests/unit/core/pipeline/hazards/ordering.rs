//! In-Order Issue Tests
//!
//! An operation in Decode may never advance while an older operation is
//! held in Fetch, even when it has no dependences of its own.

use superpipe_core::config::BranchPredictor;
use superpipe_core::core::pipeline::hazards::{Forwarding, StallCause, check_stall, older_stalled};
use superpipe_core::core::pipeline::latches::Stage;

use crate::common::builder::{LatchBuilder, RecordBuilder, candidate};
use crate::common::harness::{TestContext, config};

#[test]
fn older_stalled_fetch_op_blocks_younger() {
    let latches = LatchBuilder::new(2)
        .stalled(0, 5, RecordBuilder::alu().build())
        .build();

    assert!(older_stalled(6, &latches));
    assert!(!older_stalled(5, &latches), "an operation never waits on itself");
    assert!(!older_stalled(4, &latches));

    let report = check_stall(&candidate(6, RecordBuilder::alu().build()), &latches, Forwarding::default());
    assert_eq!(report.cause(), Some(StallCause::Ordering));
}

#[test]
fn unstalled_or_invalid_fetch_slots_do_not_block() {
    let mut latches = LatchBuilder::new(2)
        .op(Stage::Fetch, 0, 1, RecordBuilder::alu().build())
        .stalled(1, 2, RecordBuilder::alu().build())
        .build();
    latches.slot_mut(Stage::Fetch, 1).valid = false;

    assert!(!older_stalled(3, &latches));
}

#[test]
fn data_cause_outranks_ordering() {
    let latches = LatchBuilder::new(2)
        .stalled(0, 1, RecordBuilder::alu().dest(2).build())
        .build();
    let report = check_stall(&candidate(3, RecordBuilder::alu().src1(2).build()), &latches, Forwarding::default());

    assert!(report.data && report.ordering);
    assert_eq!(report.cause(), Some(StallCause::Data));
}

#[test]
fn independent_op_waits_behind_stalled_bundle_mate() {
    // op2 depends on op1 in the same bundle; op3 is independent but younger.
    let trace = vec![
        RecordBuilder::alu().dest(1).build(),
        RecordBuilder::alu().dest(2).src1(1).build(),
        RecordBuilder::alu().dest(3).build(),
    ];
    let mut ctx = TestContext::new(config(2, false, false, BranchPredictor::None), trace);
    let snaps = ctx.run_traced();

    // Cycle 2: op2 fails against its bundle mate and op3 fills the free lane.
    assert_eq!(snaps[1].fetch, vec![2, 3]);
    assert_eq!(snaps[1].decode, vec![1]);
    // Cycles 3-4: op3 sits behind op2.
    assert!(snaps[2].decode.is_empty());
    assert!(snaps[3].decode.is_empty());

    let stats = ctx.stats();
    assert_eq!(stats.stalls_data, 3);
    assert_eq!(stats.stalls_ordering, 2);
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.cycles, 8);
}
