use std::io;

use super::{ResultSink, SharedOutput};
use crate::record::PrimeRecord;

/// Writes every record straight to the shared output, one lock per record.
///
/// Highest lock traffic of the three strategies; lines from different workers
/// interleave in lock-acquisition order.
pub struct ImmediateSink {
    output: SharedOutput,
}

impl ImmediateSink {
    pub fn new(output: SharedOutput) -> Self {
        Self { output }
    }
}

impl ResultSink for ImmediateSink {
    fn ingest(&mut self, record: PrimeRecord) -> io::Result<()> {
        self.output.write_record(&record)
    }

    fn finalize(&mut self, _worker_id: usize) -> io::Result<()> {
        Ok(())
    }
}
