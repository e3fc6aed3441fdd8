//! Pipeline Engine Tests
//!
//! End-to-end cycle counts and state transitions on short traces. A trace of
//! `n` operations through a single-lane pipeline takes `n + 4` cycles when
//! nothing stalls: four latched stages plus the writeback step.

use pretty_assertions::assert_eq;
use superpipe_core::common::error::{ConfigError, SimError};
use superpipe_core::config::{BranchPredictor, Config};
use superpipe_core::core::pipeline::latches::Stage;
use superpipe_core::trace::{InstructionFeed, MemoryFeed, TraceRecord};
use superpipe_core::{Pipeline, Simulator};

use crate::common::builder::RecordBuilder;
use crate::common::harness::{TestContext, config};

fn independent(n: u8) -> Vec<TraceRecord> {
    (0..n).map(|i| RecordBuilder::alu().dest(i).src1(100).build()).collect()
}

// ═════════════════════════════════════════════════════════════════════════════
//  Construction
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn zero_width_is_rejected() {
    let err = Pipeline::with_width(0).unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::ZeroWidth)));

    let mut cfg = Config::default();
    cfg.pipeline.width = 0;
    assert!(Simulator::new(&cfg, MemoryFeed::default()).is_err());
}

#[test]
fn fresh_pipeline_is_empty() {
    let p = Pipeline::with_width(3).unwrap();
    assert_eq!(p.latches().width(), 3);
    assert!(p.latches().is_empty());
    assert!(!p.is_halted());
    assert!(!p.is_fetch_stalled());
    assert_eq!(p.halt_op_id(), None);
    assert!(p.branch_unit().is_none());
    assert!(!p.stats().predictor_configured);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Straight-line code
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn independent_ops_flow_without_stalls() {
    let mut ctx = TestContext::scalar(independent(3));
    let stats = ctx.run();

    assert_eq!(stats.cycles, 7);
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.decode_stalls(), 0);
    assert_eq!(ctx.pipeline().halt_op_id(), Some(3));
    assert_eq!(ctx.pipeline().last_retired(), Some(3));
}

#[test]
fn op_ids_start_at_one_and_follow_fetch_order() {
    let mut ctx = TestContext::scalar(independent(2));
    let first = ctx.step();
    let second = ctx.step();

    assert_eq!(first.fetch, vec![1]);
    assert_eq!(second.fetch, vec![2]);
    assert_eq!(second.decode, vec![1]);
}

#[test]
fn raw_dependence_without_forwarding_costs_two_cycles() {
    let trace = vec![
        RecordBuilder::alu().dest(1).build(),
        RecordBuilder::alu().dest(2).build(),
        RecordBuilder::alu().dest(3).src1(2).build(),
    ];
    let mut ctx = TestContext::scalar(trace);
    let snaps = ctx.run_traced();

    // Held in Fetch while op 2 occupies Execute and then Memory.
    assert!(snaps[3].decode.is_empty());
    assert!(snaps[4].decode.is_empty());
    assert_eq!(snaps[5].decode, vec![3]);

    let stats = ctx.stats();
    assert_eq!(stats.stalls_data, 2);
    assert_eq!(stats.cycles, 3 + 5 - 1 + 2);
}

#[test]
fn raw_dependence_on_alu_is_free_with_memory_forwarding() {
    let trace = vec![
        RecordBuilder::alu().dest(2).build(),
        RecordBuilder::alu().dest(3).src1(2).build(),
        RecordBuilder::alu().dest(4).src2(3).build(),
    ];
    let mut ctx = TestContext::new(config(1, true, false, BranchPredictor::None), trace);
    let stats = ctx.run();

    assert_eq!(stats.stalls_data, 0);
    assert_eq!(stats.cycles, 7);
}

#[test]
fn execute_forwarding_alone_does_not_help_a_single_lane() {
    let trace = vec![
        RecordBuilder::alu().dest(2).build(),
        RecordBuilder::alu().dest(3).src1(2).build(),
    ];
    let mut ctx = TestContext::new(config(1, false, true, BranchPredictor::None), trace);
    assert_eq!(ctx.run().stalls_data, 2);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Branches
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn mispredicted_branch_stalls_fetch_until_it_retires() {
    let trace = vec![RecordBuilder::branch(false).addr(0x40).build()];
    let mut ctx = TestContext::new(config(1, false, false, BranchPredictor::AlwaysTaken), trace);
    let snaps = ctx.run_traced();

    let stalled: Vec<bool> = snaps.iter().map(|s| s.fetch_stalled).collect();
    assert_eq!(stalled, vec![true, true, true, true, false]);

    let stats = ctx.stats();
    assert_eq!(stats.branch_predictions, 1);
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.fetch_bubbles, 3);
    assert_eq!(stats.cycles, 5);
    assert_eq!(stats.instructions_retired, 1);
}

#[test]
fn correctly_predicted_branch_does_not_stall() {
    let trace = vec![
        RecordBuilder::branch(true).build(),
        RecordBuilder::alu().build(),
    ];
    let mut ctx = TestContext::new(config(1, false, false, BranchPredictor::AlwaysTaken), trace);
    let stats = ctx.run();

    assert_eq!(stats.branch_mispredictions, 0);
    assert_eq!(stats.fetch_bubbles, 0);
    assert_eq!(stats.cycles, 6);
}

#[test]
fn ops_behind_a_mispredict_are_fetched_after_it_retires() {
    let trace = vec![
        RecordBuilder::branch(false).build(),
        RecordBuilder::alu().build(),
    ];
    let mut ctx = TestContext::new(config(1, false, false, BranchPredictor::Perfect), trace);
    let snaps = ctx.run_traced();

    assert_eq!(snaps[4].fetch, vec![2], "fetch resumes in the retirement cycle");
    assert_eq!(ctx.stats().cycles, 9);
}

#[test]
fn no_predictor_never_stalls_fetch() {
    let trace = vec![
        RecordBuilder::branch(false).build(),
        RecordBuilder::branch(true).build(),
    ];
    let mut ctx = TestContext::scalar(trace);
    let stats = ctx.run();

    assert!(!stats.predictor_configured);
    assert_eq!(stats.branch_predictions, 0);
    assert_eq!(stats.cycles, 6);
}

#[test]
fn gshare_learns_not_taken_after_one_miss() {
    let trace = vec![
        RecordBuilder::branch(false).addr(0x40).build(),
        RecordBuilder::branch(false).addr(0x40).build(),
    ];
    let mut ctx = TestContext::new(config(1, false, false, BranchPredictor::GShare), trace);
    let stats = ctx.run();

    assert_eq!(stats.branch_predictions, 2);
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.cycles, 9);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Halting
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn empty_trace_halts_on_first_cycle() {
    let mut ctx = TestContext::scalar(Vec::new());
    let stats = ctx.run();

    assert_eq!(stats.cycles, 1);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(ctx.pipeline().halt_op_id(), Some(0));
}

#[test]
fn feed_is_not_consulted_after_exhaustion() {
    let mut ctx = TestContext::scalar(independent(3));
    let _ = ctx.run();
    assert_eq!(ctx.sim.feed().requests(), 4);

    let mut ctx = TestContext::new(config(2, false, false, BranchPredictor::None), independent(4));
    let _ = ctx.run();
    assert_eq!(ctx.sim.feed().requests(), 5);
}

#[test]
fn cycle_limit_aborts_run() {
    let mut cfg = Config::default();
    cfg.general.max_cycles = Some(3);
    let mut ctx = TestContext::new(cfg, independent(3));

    let err = ctx.sim.run().unwrap_err();
    assert!(matches!(err, SimError::CycleLimit { cycles: 3 }));
}

#[test]
fn cycle_accepts_borrowed_feed() {
    let mut feed = MemoryFeed::new(independent(1));
    let mut pipe = Pipeline::with_width(1).unwrap();
    let dyn_feed: &mut dyn InstructionFeed = &mut feed;
    while !pipe.is_halted() {
        pipe.cycle(&mut *dyn_feed).unwrap();
    }
    assert_eq!(pipe.stats().cycles, 5);
    assert!(pipe.latches().stage(Stage::Memory).iter().all(|s| !s.valid));
    assert!(pipe.latches().is_empty());
}
