//! Instruction Fetch (IF) Step.
//!
//! Fills every Fetch lane that is not held by backpressure. While a
//! mispredicted branch is unresolved, free lanes receive bubbles instead.
//! Conditional branches are predicted as they are fetched; because the trace
//! already carries the resolved direction, a misprediction is known
//! immediately and the predictor is trained on the spot.

use tracing::{debug, trace};

use crate::common::error::TraceError;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::{Stage, StageSlot};
use crate::trace::feed::InstructionFeed;

/// Executes the fetch step.
///
/// Lanes whose Fetch slot carries the stall flag are left untouched. After all
/// lanes are processed the stage is re-sorted by op id so program order runs
/// left to right.
///
/// # Errors
///
/// Propagates any error from the feed.
pub fn fetch_stage<F: InstructionFeed + ?Sized>(p: &mut Pipeline, feed: &mut F) -> Result<(), TraceError> {
    for lane in 0..p.latches.width() {
        if p.latches.slot(Stage::Fetch, lane).stall {
            continue;
        }

        let next = if p.fetch_stalled {
            p.stats.fetch_bubbles += 1;
            StageSlot::BUBBLE
        } else {
            fetch_op(p, feed)?.unwrap_or(StageSlot::BUBBLE)
        };
        *p.latches.slot_mut(Stage::Fetch, lane) = next;
    }

    p.latches.sort_stage(Stage::Fetch);
    debug_assert!(p.latches.is_ordered(Stage::Fetch), "fetch stage out of program order");

    if p.feed_exhausted && !p.halted && p.latches.is_empty() {
        debug!(cycle = p.stats.cycles, "stream exhausted with nothing in flight");
        p.halted = true;
    }

    Ok(())
}

/// Pulls one record and wraps it in a fresh slot.
///
/// Returns `None` once the feed is exhausted. The first time that happens the
/// id of the last fetched operation becomes the halt watermark; afterwards the
/// feed is not consulted again.
fn fetch_op<F: InstructionFeed + ?Sized>(p: &mut Pipeline, feed: &mut F) -> Result<Option<StageSlot>, TraceError> {
    if p.feed_exhausted {
        return Ok(None);
    }

    let Some(record) = feed.next_record()? else {
        p.feed_exhausted = true;
        p.halt_op_id = Some(p.last_op_id);
        debug!(halt_op_id = p.last_op_id, "instruction feed exhausted");
        return Ok(None);
    };

    p.last_op_id += 1;
    let mut slot = StageSlot::new(p.last_op_id, record);

    if record.is_cond_branch() {
        if let Some(unit) = p.bpred.as_mut() {
            let predicted = unit.predict(record.inst_addr);
            if predicted != record.br_dir {
                trace!(
                    op_id = slot.op_id,
                    addr = record.inst_addr,
                    predicted,
                    "branch mispredicted, fetch stalled"
                );
                p.fetch_stalled = true;
                slot.mispredicted = true;
            }
            unit.update(record.inst_addr, record.br_dir, predicted);
            p.stats.branch_predictions = unit.branches();
            p.stats.branch_mispredictions = unit.mispredictions();
        }
    }

    Ok(Some(slot))
}
