//! Functional units consulted by the pipeline.

/// Branch prediction unit.
pub mod bru;
