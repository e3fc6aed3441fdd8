//! Binary trace file decoder.
//!
//! Reads consecutive [`RECORD_SIZE`]-byte records from any [`Read`] source.
//! A clean end of input ends the stream; so does a trailing partial record,
//! which is reported with a warning and otherwise ignored.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::common::error::TraceError;
use crate::trace::feed::InstructionFeed;
use crate::trace::record::{RECORD_SIZE, TraceRecord};

/// Streaming decoder for binary trace files.
#[derive(Debug)]
pub struct TraceReader<R> {
    inner: R,
    offset: u64,
    records: u64,
    exhausted: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file for buffered reading.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened trace file");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> TraceReader<R> {
    /// Wraps a reader positioned at the first record.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            records: 0,
            exhausted: false,
        }
    }

    /// Number of records decoded so far.
    pub const fn records_read(&self) -> u64 {
        self.records
    }

    /// Fills `buf` as far as the input allows and returns the byte count.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, TraceError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> InstructionFeed for TraceReader<R> {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        if self.exhausted {
            return Ok(None);
        }

        let mut buf = [0u8; RECORD_SIZE];
        let n = self.fill(&mut buf)?;
        if n < RECORD_SIZE {
            self.exhausted = true;
            if n > 0 {
                warn!(
                    offset = self.offset,
                    bytes = n,
                    "ignoring truncated record at end of trace"
                );
            }
            debug!(records = self.records, "trace exhausted");
            return Ok(None);
        }

        let record = TraceRecord::decode(&buf, self.offset)?;
        self.offset += RECORD_SIZE as u64;
        self.records += 1;
        Ok(Some(record))
    }
}
