//! Cycle-advance engine.
//!
//! [`Pipeline`] owns every piece of mutable simulator state: the latch array,
//! the branch unit, the fetch-stall flag, the op-id counter, the halt
//! watermark and the statistics. One call to [`Pipeline::cycle`] runs the five
//! stage steps in reverse order (writeback, memory, execute, decode, fetch) so
//! each stage reads its predecessor's contents before they are overwritten.

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::hazards::Forwarding;
use crate::core::pipeline::latches::{LatchArray, OpId};
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};
use crate::core::units::bru::BranchUnit;
use crate::stats::SimStats;
use crate::trace::feed::InstructionFeed;

/// In-order superscalar pipeline state.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// In-flight operation slots.
    pub(crate) latches: LatchArray,
    /// Enabled bypass paths.
    pub(crate) forwarding: Forwarding,
    /// Branch predictor, if one is configured.
    pub(crate) bpred: Option<BranchUnit>,
    /// Set while a mispredicted branch is in flight; blocks all fetch.
    pub(crate) fetch_stalled: bool,
    /// Id of the most recently fetched operation (0 before the first fetch).
    pub(crate) last_op_id: OpId,
    /// Id of the last operation in the stream, known once the feed runs dry.
    pub(crate) halt_op_id: Option<OpId>,
    /// The feed has reported end of stream; it is never asked again.
    pub(crate) feed_exhausted: bool,
    /// The final operation has retired.
    pub(crate) halted: bool,
    /// Id of the most recently retired operation.
    pub(crate) last_retired: Option<OpId>,
    /// Emit a latch dump after every cycle.
    trace_pipeline: bool,
    /// Performance counters.
    pub(crate) stats: SimStats,
}

impl Pipeline {
    /// Builds an empty pipeline for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWidth`](crate::common::error::ConfigError::ZeroWidth) (wrapped in [`SimError`]) if the
    /// configuration is rejected by [`Config::validate`].
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let pipe = &config.pipeline;
        let bpred = BranchUnit::new(pipe.branch_predictor);

        debug!(
            width = pipe.width,
            mem_forwarding = pipe.mem_forwarding,
            exe_forwarding = pipe.exe_forwarding,
            branch_predictor = ?pipe.branch_predictor,
            "pipeline initialised"
        );

        let stats = SimStats::new(bpred.is_some());

        Ok(Self {
            latches: LatchArray::new(pipe.width),
            forwarding: Forwarding::new(pipe.mem_forwarding, pipe.exe_forwarding),
            bpred,
            fetch_stalled: false,
            last_op_id: 0,
            halt_op_id: None,
            feed_exhausted: false,
            halted: false,
            last_retired: None,
            trace_pipeline: config.general.trace_pipeline,
            stats,
        })
    }

    /// Builds a pipeline of `width` lanes with otherwise default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is zero.
    pub fn with_width(width: usize) -> Result<Self, SimError> {
        let mut config = Config::default();
        config.pipeline.width = width;
        Self::new(&config)
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Errors
    ///
    /// Propagates feed failures from the fetch step. The cycle's earlier steps
    /// have already been applied when that happens.
    pub fn cycle<F: InstructionFeed + ?Sized>(&mut self, feed: &mut F) -> Result<(), SimError> {
        self.stats.cycles += 1;

        wb_stage(self);
        mem_stage(self);
        execute_stage(self);
        decode_stage(self);
        fetch_stage(self, feed)?;

        debug_assert!(
            self.latches.has_unique_residency(),
            "op id resident twice after cycle {}",
            self.stats.cycles
        );

        if self.trace_pipeline {
            trace!(
                cycle = self.stats.cycles,
                retired = self.stats.instructions_retired,
                "pipeline state\n{}",
                self.latches
            );
        }

        Ok(())
    }

    /// Returns `true` once the final operation has retired.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Returns `true` while a mispredicted branch blocks fetch.
    pub const fn is_fetch_stalled(&self) -> bool {
        self.fetch_stalled
    }

    /// Id of the last operation in the stream, once known.
    pub const fn halt_op_id(&self) -> Option<OpId> {
        self.halt_op_id
    }

    /// Id of the most recently retired operation.
    pub const fn last_retired(&self) -> Option<OpId> {
        self.last_retired
    }

    /// Current latch contents.
    pub const fn latches(&self) -> &LatchArray {
        &self.latches
    }

    /// Enabled bypass paths.
    pub const fn forwarding(&self) -> Forwarding {
        self.forwarding
    }

    /// The configured branch unit, if any.
    pub const fn branch_unit(&self) -> Option<&BranchUnit> {
        self.bpred.as_ref()
    }

    /// Performance counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }
}
