//! Instruction trace input.
//!
//! The simulator is trace driven: it never executes instructions, it replays
//! pre-recorded records that already carry their register usage and resolved
//! branch direction. This module provides:
//! 1. **Records:** The normalized [`TraceRecord`] and its binary layout.
//! 2. **Feeds:** The [`InstructionFeed`] contract the fetch stage pulls from.
//! 3. **Reader:** A decoder for binary trace files.

/// The `InstructionFeed` trait and an in-memory feed.
pub mod feed;

/// Binary trace file decoder.
pub mod reader;

/// Trace record definition and binary encoding.
pub mod record;

pub use feed::{InstructionFeed, MemoryFeed};
pub use reader::TraceReader;
pub use record::{OpType, RECORD_SIZE, TraceRecord};
