//! Memory (MA) Step.
//!
//! Memory operations are modelled as single-cycle, so this step only moves
//! the Execute stage down one latch.

use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::Stage;

/// Copies every Execute-stage slot into the same Memory-stage lane.
pub fn mem_stage(p: &mut Pipeline) {
    p.latches.advance(Stage::Execute, Stage::Memory);
}
