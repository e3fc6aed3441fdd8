//! Branch prediction unit (BRU).
//!
//! This module contains the direction predictors used at fetch and the
//! [`BranchUnit`] that wraps the configured one together with its
//! branch and misprediction counters.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictor (always taken).
pub mod static_bp;

use tracing::debug;

use self::{gshare::GSharePredictor, static_bp::StaticPredictor};
use crate::config::BranchPredictor as BpType;

/// Enum wrapper for static dispatch of branch predictors.
#[derive(Debug, Clone)]
pub enum BranchPredictorWrapper {
    /// Always-taken predictor (also used for the perfect-policy stub).
    Static(StaticPredictor),
    /// Global history predictor.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Builds the predictor for `policy`, or `None` when no predictor is configured.
    pub fn new(policy: BpType) -> Option<Self> {
        match policy {
            BpType::None => None,
            BpType::Perfect | BpType::AlwaysTaken => Some(Self::Static(StaticPredictor::new())),
            BpType::GShare => Some(Self::GShare(GSharePredictor::new())),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict_branch(&self, pc: u32) -> bool {
        match self {
            Self::Static(bp) => bp.predict_branch(pc),
            Self::GShare(bp) => bp.predict_branch(pc),
        }
    }

    #[inline(always)]
    fn update_branch(&mut self, pc: u32, taken: bool) {
        match self {
            Self::Static(bp) => bp.update_branch(pc, taken),
            Self::GShare(bp) => bp.update_branch(pc, taken),
        }
    }
}

/// The configured predictor plus its running statistics.
///
/// Every [`predict`](Self::predict) counts one branch; every
/// [`update`](Self::update) whose outcome differs from the prediction counts
/// one misprediction.
#[derive(Debug, Clone)]
pub struct BranchUnit {
    predictor: BranchPredictorWrapper,
    branches: u64,
    mispredictions: u64,
}

impl BranchUnit {
    /// Creates a unit for `policy`, or `None` if the policy is [`BpType::None`].
    pub fn new(policy: BpType) -> Option<Self> {
        let predictor = BranchPredictorWrapper::new(policy)?;
        debug!(?policy, "branch predictor allocated");
        Some(Self {
            predictor,
            branches: 0,
            mispredictions: 0,
        })
    }

    /// Predicts the direction of the branch at `pc` and counts it.
    pub fn predict(&mut self, pc: u32) -> bool {
        self.branches += 1;
        self.predictor.predict_branch(pc)
    }

    /// Records the resolved direction of the branch at `pc`.
    ///
    /// Training always uses `actual`; `predicted` only feeds the
    /// misprediction counter.
    pub fn update(&mut self, pc: u32, actual: bool, predicted: bool) {
        if actual != predicted {
            self.mispredictions += 1;
        }
        self.predictor.update_branch(pc, actual);
    }

    /// Number of branches predicted so far.
    pub const fn branches(&self) -> u64 {
        self.branches
    }

    /// Number of mispredicted branches so far.
    pub const fn mispredictions(&self) -> u64 {
        self.mispredictions
    }

    /// The underlying predictor.
    pub const fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }
}
