//! Core processor model.
//!
//! This module contains the pipeline (latches, hazard unit, stage steps and
//! engine) and the functional units it consults.

/// Instruction pipeline implementation (engine, stages, latches, hazards).
pub mod pipeline;

/// Functional units (branch predictor).
pub mod units;

pub use self::pipeline::Pipeline;
