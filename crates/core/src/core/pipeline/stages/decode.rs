//! Instruction Decode (ID) Step.
//!
//! Moves each Fetch lane into Decode and runs the hazard unit on it before
//! moving on to the next lane. A stalled operation becomes a bubble in Decode
//! and its Fetch slot is flagged so the fetch step leaves it in place for a
//! retry.
//!
//! Lanes are handled in ascending order, which is program order because the
//! Fetch stage is kept sorted by op id. While lane `i` is checked, Decode
//! lanes below it already hold this cycle's operations and lanes above it
//! still hold the ones that advanced to Execute at the start of the cycle.
//! Those stale copies are what Decode-stage forwarding bypasses.

use tracing::trace;

use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::hazards::check_stall;
use crate::core::pipeline::latches::Stage;

/// Executes the decode step.
pub fn decode_stage(p: &mut Pipeline) {
    for lane in 0..p.latches.width() {
        let candidate = *p.latches.slot(Stage::Fetch, lane);
        *p.latches.slot_mut(Stage::Decode, lane) = candidate;
        if !candidate.valid {
            continue;
        }

        let report = check_stall(&candidate, &p.latches, p.forwarding);
        match report.cause() {
            None => {
                p.latches.slot_mut(Stage::Fetch, lane).stall = false;
            }
            Some(cause) => {
                trace!(op_id = candidate.op_id, lane, ?cause, "decode stall");
                p.latches.slot_mut(Stage::Decode, lane).valid = false;
                p.latches.slot_mut(Stage::Fetch, lane).stall = true;
                p.stats.record_stall(cause);
            }
        }
    }
}
