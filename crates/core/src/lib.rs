//! In-order superscalar pipeline simulator library.
//!
//! This crate replays a recorded instruction trace through a cycle-accurate
//! model of a four-stage, `width`-lane in-order pipeline:
//! 1. **Core:** Stage latches, hazard/stall unit with optional forwarding,
//!    and the cycle-advance engine.
//! 2. **Branch prediction:** Always-taken and gshare direction predictors with
//!    fetch stalls on misprediction.
//! 3. **Trace:** Instruction records, the feed contract, and a binary trace decoder.
//! 4. **Simulation:** Configuration, driver loop, and statistics collection.

/// Error types.
pub mod common;
/// Simulator configuration (defaults, branch predictor policy, validation).
pub mod config;
/// Pipeline engine, stages, hazards and branch prediction unit.
pub mod core;
/// Driver loop.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Instruction trace records, feeds and decoder.
pub mod trace;

/// Root configuration type; use `Config::default()` or [`Config::from_json`].
pub use crate::config::Config;
/// Pipeline state and cycle advance.
pub use crate::core::Pipeline;
/// Driver owning a pipeline and its feed.
pub use crate::sim::Simulator;
/// Top-level error type.
pub use crate::common::SimError;
