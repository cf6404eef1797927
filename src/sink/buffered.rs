use std::io;

use super::{ResultSink, SharedOutput};
use crate::record::PrimeRecord;

/// Keeps a private buffer per worker and publishes it once, on finalize.
///
/// `ingest` never locks. Each worker's records reach the output as one
/// contiguous, ascending block; the order of blocks follows whichever worker
/// finalizes first.
pub struct BufferedSink {
    owner: usize,
    output: SharedOutput,
    buffer: Vec<PrimeRecord>,
}

impl BufferedSink {
    pub fn new(owner: usize, output: SharedOutput) -> Self {
        Self {
            owner,
            output,
            buffer: Vec::new(),
        }
    }
}

impl ResultSink for BufferedSink {
    fn ingest(&mut self, record: PrimeRecord) -> io::Result<()> {
        self.buffer.push(record);
        Ok(())
    }

    fn finalize(&mut self, worker_id: usize) -> io::Result<()> {
        debug_assert_eq!(worker_id, self.owner, "buffer finalized by a different worker");

        if self.buffer.is_empty() {
            return Ok(());
        }

        tracing::trace!("Worker {} flushing {} buffered record(s)", worker_id, self.buffer.len());
        self.output.write_batch(&self.buffer)?;
        self.buffer.clear();
        Ok(())
    }
}
