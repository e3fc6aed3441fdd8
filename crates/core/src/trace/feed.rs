//! Instruction feed interface.
//!
//! The fetch stage pulls one record per free lane from an [`InstructionFeed`].
//! A feed answers with the next record or `None` once the stream is
//! exhausted; the pipeline records the exhaustion point and never asks again.

use crate::common::error::TraceError;
use crate::trace::record::TraceRecord;

/// Source of instruction records for the fetch stage.
pub trait InstructionFeed {
    /// Returns the next record, or `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns a [`TraceError`] if the underlying source fails or yields an
    /// undecodable record.
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError>;
}

impl<F: InstructionFeed + ?Sized> InstructionFeed for &mut F {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        (**self).next_record()
    }
}

impl<F: InstructionFeed + ?Sized> InstructionFeed for Box<F> {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        (**self).next_record()
    }
}

/// In-memory feed over a vector of records.
///
/// Counts how many times it was asked for a record so callers can verify the
/// pipeline stops requesting once the stream is exhausted.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    records: std::vec::IntoIter<TraceRecord>,
    requests: usize,
}

impl MemoryFeed {
    /// Creates a feed that yields `records` in order.
    pub fn new(records: Vec<TraceRecord>) -> Self {
        Self {
            records: records.into_iter(),
            requests: 0,
        }
    }

    /// Number of `next_record` calls served so far.
    pub const fn requests(&self) -> usize {
        self.requests
    }

    /// Number of records not yet handed out.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl FromIterator<TraceRecord> for MemoryFeed {
    fn from_iter<I: IntoIterator<Item = TraceRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl InstructionFeed for MemoryFeed {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        self.requests += 1;
        Ok(self.records.next())
    }
}
