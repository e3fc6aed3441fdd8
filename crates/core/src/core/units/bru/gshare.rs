//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the instruction address using
//! an XOR hash, letting the same static branch train different counters in
//! different history contexts.
//!
//! # Performance
//!
//! - **Time Complexity:** `predict()` and `update()` are O(1)
//! - **Space Complexity:** 4096 2-bit counters (12 history bits)
//! - **Best Case:** Branches whose outcome depends on recent global history
//! - **Worst Case:** Uncorrelated branches aliasing in the table

use super::BranchPredictor;

/// Number of global history bits (and PHT index bits).
pub const HISTORY_BITS: u32 = 12;
/// Mask selecting the low `HISTORY_BITS` bits.
pub const HISTORY_MASK: u32 = (1 << HISTORY_BITS) - 1;
/// Total number of entries in the PHT.
pub const TABLE_SIZE: usize = 1 << HISTORY_BITS;
/// Saturation ceiling of a PHT counter.
pub const COUNTER_MAX: u8 = 3;
/// Reset value of every PHT counter (weakly taken).
pub const COUNTER_INIT: u8 = 2;

/// GShare predictor state.
#[derive(Debug, Clone)]
pub struct GSharePredictor {
    /// Global History Register; only the low `HISTORY_BITS` bits are ever set.
    ghr: u32,
    /// Pattern History Table of 2-bit saturating counters.
    pht: Vec<u8>,
}

impl Default for GSharePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl GSharePredictor {
    /// Creates a predictor with empty history and every counter weakly taken.
    pub fn new() -> Self {
        Self {
            ghr: 0,
            pht: vec![COUNTER_INIT; TABLE_SIZE],
        }
    }

    /// Calculates the PHT index for `pc` under the current history.
    pub const fn index(&self, pc: u32) -> usize {
        ((pc & HISTORY_MASK) ^ (self.ghr & HISTORY_MASK)) as usize
    }

    /// Current global history register value.
    pub const fn ghr(&self) -> u32 {
        self.ghr
    }

    /// Counter that a prediction for `pc` would read right now.
    pub fn counter(&self, pc: u32) -> u8 {
        self.pht[self.index(pc)]
    }

    /// Read-only view of the whole pattern table.
    pub fn table(&self) -> &[u8] {
        &self.pht
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns taken if the indexed counter is 2 or 3.
    fn predict_branch(&self, pc: u32) -> bool {
        self.counter(pc) >= 2
    }

    /// Moves the indexed counter towards the outcome and shifts the outcome
    /// into the history register.
    fn update_branch(&mut self, pc: u32, taken: bool) {
        let idx = self.index(pc);
        let counter = &mut self.pht[idx];

        if taken {
            *counter = (*counter + 1).min(COUNTER_MAX);
        } else {
            *counter = counter.saturating_sub(1);
        }

        self.ghr = ((self.ghr << 1) | u32::from(taken)) & HISTORY_MASK;
    }
}
