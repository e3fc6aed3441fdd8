//! Writeback (WB) Step.
//!
//! Retires every valid operation in the Memory stage. Retirement is where the
//! run ends (the halt watermark is reached) and where a mispredicted branch
//! releases the fetch stall it imposed.

use tracing::{debug, trace};

use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::Stage;

/// Executes the writeback step.
///
/// For each valid Memory-stage slot: counts a retired instruction, sets the
/// halted flag if the slot's id reaches the halt watermark, and clears the
/// fetch stall if the slot is a mispredicted branch.
pub fn wb_stage(p: &mut Pipeline) {
    for lane in 0..p.latches.width() {
        let slot = *p.latches.slot(Stage::Memory, lane);
        if !slot.valid {
            continue;
        }

        debug_assert!(
            p.last_retired.is_none_or(|last| last < slot.op_id),
            "op {} retired after op {:?}",
            slot.op_id,
            p.last_retired
        );
        p.last_retired = Some(slot.op_id);
        p.stats.instructions_retired += 1;

        if p.halt_op_id.is_some_and(|halt| slot.op_id >= halt) {
            debug!(op_id = slot.op_id, cycle = p.stats.cycles, "final operation retired");
            p.halted = true;
        }

        if slot.mispredicted {
            trace!(op_id = slot.op_id, "mispredicted branch retired, fetch resumes");
            p.fetch_stalled = false;
        }
    }
}
