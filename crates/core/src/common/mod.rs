//! Common types shared across the simulator.
//!
//! Currently this is the error hierarchy; everything else lives next to the
//! component that owns it.

/// Error types for configuration, trace decoding and simulation.
pub mod error;

pub use error::{ConfigError, SimError, TraceError};
