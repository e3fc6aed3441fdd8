//! Pipeline stage implementations.
//!
//! Each step of a cycle lives in its own module. The engine calls them back to
//! front:
//! 1. **Writeback:** Retires Memory-stage operations and resolves mispredictions.
//! 2. **Memory:** Shifts Execute into Memory.
//! 3. **Execute:** Shifts Decode into Execute.
//! 4. **Decode:** Shifts Fetch into Decode and applies the hazard unit.
//! 5. **Fetch:** Pulls new records from the feed and consults the branch predictor.

/// Instruction decode step.
pub mod decode;

/// Execute step.
pub mod execute;

/// Instruction fetch step.
pub mod fetch;

/// Memory step.
pub mod memory;

/// Writeback (retire) step.
pub mod writeback;

/// Decode step entry point (ID stage).
pub use decode::decode_stage;
/// Execute step entry point (EX stage).
pub use execute::execute_stage;
/// Fetch step entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory step entry point (MA stage).
pub use memory::mem_stage;
/// Writeback step entry point (WB).
pub use writeback::wb_stage;
