//! Error definitions for the pipeline simulator.
//!
//! This module defines the failure modes that can surface while building or
//! running a pipeline. It provides:
//! 1. **Configuration Errors:** Malformed or unparsable configuration.
//! 2. **Trace Errors:** I/O failures and undecodable instruction records.
//! 3. **Simulation Errors:** The umbrella type returned by the engine and driver.
//!
//! Reaching the end of an instruction stream is not an error; feeds report it
//! as `Ok(None)`.

use thiserror::Error;

/// Errors raised while loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The pipeline width must be at least one lane.
    #[error("pipeline width must be a positive integer, got 0")]
    ZeroWidth,

    /// A numeric branch-predictor policy code outside `0..=2`.
    #[error("unknown branch predictor policy code {0}")]
    UnknownPolicy(u32),

    /// The configuration text was not valid JSON for the expected schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while decoding an instruction trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A record carried an operation-type code outside the known set.
    ///
    /// `offset` is the byte offset of the offending record within the stream.
    #[error("unknown op type {code} in record at byte offset {offset}")]
    UnknownOpType {
        /// Byte offset of the record.
        offset: u64,
        /// The raw op-type byte.
        code: u8,
    },
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected; the pipeline refuses to run.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The instruction feed failed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The driver hit its configured cycle limit before the pipeline halted.
    #[error("simulation did not halt within {cycles} cycles")]
    CycleLimit {
        /// Number of cycles simulated when the limit tripped.
        cycles: u64,
    },
}
