//! Simulation driver.
//!
//! Pairs a pipeline with an instruction feed and runs it to completion.

/// Driver loop and top-level simulator type.
pub mod simulator;

pub use simulator::Simulator;
