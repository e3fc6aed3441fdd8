//! Execute (EX) Step.

use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::Stage;

/// Copies every Decode-stage slot into the same Execute-stage lane.
pub fn execute_stage(p: &mut Pipeline) {
    p.latches.advance(Stage::Decode, Stage::Execute);
}
