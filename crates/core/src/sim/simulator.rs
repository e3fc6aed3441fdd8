//! Simulator: owns a pipeline and the feed it fetches from.
//!
//! This is the driver loop the rest of the core treats as external: it ticks
//! the pipeline until the final operation retires and hands back the
//! statistics.

use tracing::info;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Pipeline;
use crate::stats::SimStats;
use crate::trace::feed::InstructionFeed;

/// Top-level simulator: pipeline state plus its instruction feed.
#[derive(Debug)]
pub struct Simulator<F> {
    /// Pipeline state (latches, predictor, counters).
    pub pipeline: Pipeline,
    feed: F,
    max_cycles: Option<u64>,
}

impl<F: InstructionFeed> Simulator<F> {
    /// Creates a simulator for `config` that fetches from `feed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is rejected.
    pub fn new(config: &Config, feed: F) -> Result<Self, SimError> {
        Ok(Self {
            pipeline: Pipeline::new(config)?,
            feed,
            max_cycles: config.general.max_cycles,
        })
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Propagates feed errors.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.pipeline.cycle(&mut self.feed)
    }

    /// Returns `true` once the final operation has retired.
    pub const fn is_halted(&self) -> bool {
        self.pipeline.is_halted()
    }

    /// Runs until the pipeline halts and returns the final statistics.
    ///
    /// # Errors
    ///
    /// Propagates feed errors, and returns [`SimError::CycleLimit`] if the
    /// configured `max_cycles` elapse first.
    pub fn run(&mut self) -> Result<SimStats, SimError> {
        while !self.pipeline.is_halted() {
            let cycles = self.pipeline.stats().cycles;
            if self.max_cycles.is_some_and(|limit| cycles >= limit) {
                return Err(SimError::CycleLimit { cycles });
            }
            self.tick()?;
        }

        let stats = self.pipeline.stats();
        info!(
            cycles = stats.cycles,
            retired = stats.instructions_retired,
            mispredictions = stats.branch_mispredictions,
            "simulation complete"
        );
        Ok(stats.clone())
    }

    /// The instruction feed.
    pub const fn feed(&self) -> &F {
        &self.feed
    }
}
