//! Load-Use Tests
//!
//! A load only has its value after the memory access, so a dependent
//! operation must wait until the load reaches the Memory stage even with
//! every bypass enabled.

use pretty_assertions::assert_eq;
use rstest::rstest;
use superpipe_core::config::BranchPredictor;
use superpipe_core::core::pipeline::hazards::{Forwarding, check_stall};
use superpipe_core::core::pipeline::latches::Stage;

use crate::common::builder::{LatchBuilder, RecordBuilder, candidate};
use crate::common::harness::{TestContext, config};

#[test]
fn load_in_execute_blocks_consumer_with_full_forwarding() {
    let latches = LatchBuilder::new(1)
        .op(Stage::Execute, 0, 1, RecordBuilder::load().dest(8).build())
        .build();
    let consumer = candidate(2, RecordBuilder::alu().src1(8).build());

    assert!(check_stall(&consumer, &latches, Forwarding::new(true, true)).data);
}

#[test]
fn load_in_memory_forwards() {
    let latches = LatchBuilder::new(1)
        .op(Stage::Memory, 0, 1, RecordBuilder::load().dest(8).build())
        .build();
    let consumer = candidate(2, RecordBuilder::alu().src1(8).build());

    assert!(!check_stall(&consumer, &latches, Forwarding::new(true, false)).stalled());
    assert!(check_stall(&consumer, &latches, Forwarding::new(false, true)).data);
}

#[test]
fn load_use_costs_exactly_one_cycle_with_memory_forwarding() {
    let trace = vec![
        RecordBuilder::alu().dest(1).build(),
        RecordBuilder::load().dest(2).src1(1).build(),
        RecordBuilder::alu().dest(3).src1(2).build(),
    ];
    let mut ctx = TestContext::new(config(1, true, false, BranchPredictor::None), trace);
    let stats = ctx.run();

    assert_eq!(stats.stalls_data, 1, "ALU->load is forwarded, load->ALU waits once");
    assert_eq!(stats.cycles, 3 + 5 - 1 + 1);
}

#[test]
fn load_and_alu_producers_under_both_forwarding_paths() {
    let run = |producer| {
        let trace = vec![producer, RecordBuilder::alu().src1(4).build()];
        let mut ctx = TestContext::new(config(1, true, true, BranchPredictor::None), trace);
        ctx.run()
    };

    let after_load = run(RecordBuilder::load().dest(4).build());
    assert_eq!(after_load.stalls_data, 1);
    assert_eq!(after_load.cycles, 2 + 5 - 1 + 1);

    let after_alu = run(RecordBuilder::alu().dest(4).build());
    assert_eq!(after_alu.stalls_data, 0);
    assert_eq!(after_alu.cycles, 2 + 5 - 1);
}

#[rstest]
//     mem    exe    load   data decode cycles
#[case(false, false, false, 2, 4, 8)]
#[case(false, false, true, 2, 4, 8)]
#[case(false, true, false, 2, 4, 8)]
#[case(false, true, true, 2, 4, 8)]
#[case(true, false, false, 1, 2, 7)]
#[case(true, false, true, 1, 2, 7)]
#[case(true, true, false, 0, 0, 6)]
#[case(true, true, true, 1, 2, 7)]
fn two_lane_producer_under_each_forwarding_setting(
    #[case] mem: bool,
    #[case] exe: bool,
    #[case] load: bool,
    #[case] stalls_data: u64,
    #[case] decode_stalls: u64,
    #[case] cycles: u64,
) {
    // Op 2 produces R5 for op 3. When op 3 is checked, op 2 sits in Execute
    // and its previous-cycle copy in Decode lane 1. Without memory forwarding
    // the Execute copy blocks on its own, so execute forwarding cannot help.
    let producer = if load {
        RecordBuilder::load().dest(5).build()
    } else {
        RecordBuilder::alu().dest(5).build()
    };
    let trace = vec![
        RecordBuilder::alu().dest(9).build(),
        producer,
        RecordBuilder::alu().src1(5).build(),
        RecordBuilder::other().build(),
    ];
    let mut ctx = TestContext::new(config(2, mem, exe, BranchPredictor::None), trace);
    let stats = ctx.run();

    assert_eq!(
        (stats.stalls_data, stats.decode_stalls(), stats.cycles),
        (stalls_data, decode_stalls, cycles),
        "mem_fwd={mem} exe_fwd={exe} load={load}"
    );
}
