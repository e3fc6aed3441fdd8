//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements. The pipeline only predicts conditional branch
//! direction; targets come from the trace.

/// Trait for branch direction prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    ///
    /// # Arguments
    ///
    /// * `pc` - Instruction address of the branch
    fn predict_branch(&self, pc: u32) -> bool;

    /// Trains the predictor with the resolved direction of the branch at `pc`.
    ///
    /// Implementations must learn from the actual outcome only, never from
    /// their own prediction.
    ///
    /// # Arguments
    ///
    /// * `pc` - Instruction address of the branch
    /// * `taken` - Whether the branch was actually taken
    fn update_branch(&mut self, pc: u32, taken: bool);
}
