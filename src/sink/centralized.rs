use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use super::ResultSink;
use crate::record::PrimeRecord;

/// Records gathered by every worker of one run, in insertion order.
#[derive(Clone, Default)]
pub struct SharedCollection {
    records: Arc<Mutex<Vec<PrimeRecord>>>,
}

impl SharedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: PrimeRecord) {
        self.records.lock().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every record out, leaving the collection empty
    pub fn drain(&self) -> Vec<PrimeRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

/// Appends records to the run's shared collection; nothing is written until
/// the orchestrator drains it after every worker has joined.
pub struct CentralizedSink {
    collection: SharedCollection,
}

impl CentralizedSink {
    pub fn new(collection: SharedCollection) -> Self {
        Self { collection }
    }
}

impl ResultSink for CentralizedSink {
    fn ingest(&mut self, record: PrimeRecord) -> io::Result<()> {
        self.collection.push(record);
        Ok(())
    }

    fn finalize(&mut self, _worker_id: usize) -> io::Result<()> {
        Ok(())
    }
}
