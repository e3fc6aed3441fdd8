//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures consumed by the core. It provides:
//! 1. **Defaults:** Baseline pipeline parameters (single lane, no forwarding, no predictor).
//! 2. **Structures:** `Config` with general and pipeline sections.
//! 3. **Enums:** Branch predictor policy selection.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()` and adjusted field by field. Every field has a default, so
//! partial documents are accepted.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default pipeline width (one lane).
    pub const PIPELINE_WIDTH: usize = 1;
}

/// Branch prediction policy.
///
/// Selects how conditional branches are predicted at fetch. Only the
/// policies other than `None` allocate a predictor and report branch
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// No predictor configured.
    ///
    /// Conditional branches are fetched without consultation and never stall fetch.
    #[default]
    None,
    /// Oracle placeholder.
    ///
    /// Currently predicts taken for every branch, like `AlwaysTaken`.
    Perfect,
    /// Static predictor that always predicts taken.
    #[serde(alias = "Taken")]
    AlwaysTaken,
    /// Global history predictor (gshare) with a 12-bit history and 4096 2-bit counters.
    #[serde(alias = "Gshare", alias = "GSHARE")]
    GShare,
}

impl BranchPredictor {
    /// Returns `true` if this policy allocates a predictor.
    pub const fn is_configured(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl TryFrom<u32> for BranchPredictor {
    type Error = ConfigError;

    /// Converts the numeric policy code used by classic lab drivers
    /// (`0` perfect, `1` always-taken, `2` gshare).
    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Perfect),
            1 => Ok(Self::AlwaysTaken),
            2 => Ok(Self::GShare),
            other => Err(ConfigError::UnknownPolicy(other)),
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use superpipe_core::config::{BranchPredictor, Config};
///
/// let json = r#"{
///     "pipeline": {
///         "width": 4,
///         "mem_forwarding": true,
///         "branch_predictor": "GShare"
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.pipeline.width, 4);
/// assert!(config.pipeline.mem_forwarding);
/// assert!(!config.pipeline.exe_forwarding);
/// assert_eq!(config.pipeline.branch_predictor, BranchPredictor::GShare);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline shape, forwarding paths and branch predictor
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a JSON document and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error
    /// reported by [`Config::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the preconditions the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWidth`] if the pipeline has no lanes.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Dump the latch array at TRACE level after every cycle
    #[serde(default)]
    pub trace_pipeline: bool,

    /// Abort the run with an error after this many cycles (unbounded if unset)
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Superscalar width (lanes per stage)
    #[serde(default = "PipelineConfig::default_width")]
    pub width: usize,

    /// Forward results from the Execute and Memory stages to Decode
    #[serde(default)]
    pub mem_forwarding: bool,

    /// Forward results from the Decode stage to a younger Decode operation
    #[serde(default)]
    pub exe_forwarding: bool,

    /// Branch predictor policy
    #[serde(default)]
    pub branch_predictor: BranchPredictor,
}

impl PipelineConfig {
    /// Returns the default pipeline width.
    const fn default_width() -> usize {
        defaults::PIPELINE_WIDTH
    }
}

impl Default for PipelineConfig {
    /// Creates a single-lane pipeline with no forwarding and no predictor.
    fn default() -> Self {
        Self {
            width: defaults::PIPELINE_WIDTH,
            mem_forwarding: false,
            exe_forwarding: false,
            branch_predictor: BranchPredictor::default(),
        }
    }
}
