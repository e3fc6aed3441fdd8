//! Instruction pipeline implementation.
//!
//! This module contains the four-stage latch pipeline and its control logic.
//! It includes the following components:
//! 1. **Engine:** The owned pipeline state and the per-cycle driver.
//! 2. **Hazards:** Data, control and ordering stall detection with forwarding.
//! 3. **Latches:** The `stage × width` slot array operations move through.
//! 4. **Stages:** The writeback, memory, execute, decode and fetch steps.

/// Pipeline state and cycle advance.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Stage latch array (IF, ID, EX, MA).
pub mod latches;

/// Pipeline stage implementations (writeback, memory, execute, decode, fetch).
pub mod stages;

pub use engine::Pipeline;
