//! Static Branch Predictor.
//!
//! Implements the "always taken" policy. It keeps no state, so training is a
//! no-op. It also stands in for the perfect-prediction policy, which is not
//! modelled as a true oracle.

use super::BranchPredictor;

/// Static predictor that predicts every conditional branch taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new static predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    fn predict_branch(&self, _pc: u32) -> bool {
        true
    }

    fn update_branch(&mut self, _pc: u32, _taken: bool) {}
}
