//! Result aggregation
//!
//! Every run publishes its primes through exactly one strategy. All three share
//! the same contract: each discovered prime is reported exactly once, concurrent
//! ingests never lose or duplicate a record, and no strategy sorts its output.
//!
//! | Strategy      | `ingest`                  | `finalize`               | after join          |
//! |---------------|---------------------------|--------------------------|---------------------|
//! | `Immediate`   | lock output, write line   | nothing                  | nothing             |
//! | `Buffered`    | push to private buffer    | lock output, write block | nothing             |
//! | `Centralized` | lock collection, append   | nothing                  | drain and write all |
//!
//! The shared resources live in an [`Aggregation`], created once per run. Each
//! worker asks it for its own boxed [`ResultSink`] bound to those resources.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

pub mod buffered;
pub mod centralized;
pub mod immediate;
pub mod output;

pub use buffered::BufferedSink;
pub use centralized::{CentralizedSink, SharedCollection};
pub use immediate::ImmediateSink;
pub use output::{RecordFormat, SharedOutput};

use crate::record::PrimeRecord;

/// Per-worker endpoint of an aggregation strategy
pub trait ResultSink: Send {
    /// Take ownership of a freshly discovered prime
    fn ingest(&mut self, record: PrimeRecord) -> io::Result<()>;

    /// Called once by the worker after its last candidate
    fn finalize(&mut self, worker_id: usize) -> io::Result<()>;
}

/// Aggregation discipline selected for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SinkStrategy {
    /// Lock and write on every prime
    #[default]
    Immediate,
    /// Buffer per worker, write once per worker
    Buffered,
    /// Collect under a lock, write everything after join
    Centralized,
}

impl SinkStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkStrategy::Immediate => "immediate",
            SinkStrategy::Buffered => "buffered",
            SinkStrategy::Centralized => "centralized",
        }
    }
}

impl fmt::Display for SinkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shared side of one run's aggregation
pub struct Aggregation {
    strategy: SinkStrategy,
    output: SharedOutput,
    collection: SharedCollection,
}

impl Aggregation {
    pub fn new(strategy: SinkStrategy, output: SharedOutput) -> Self {
        Self {
            strategy,
            output,
            collection: SharedCollection::new(),
        }
    }

    pub fn strategy(&self) -> SinkStrategy {
        self.strategy
    }

    /// Records waiting in the shared collection (Centralized only)
    pub fn pending(&self) -> usize {
        self.collection.len()
    }

    /// A sink for one worker, bound to this run's shared output or collection
    pub fn sink_for(&self, worker_id: usize) -> Box<dyn ResultSink> {
        match self.strategy {
            SinkStrategy::Immediate => Box::new(ImmediateSink::new(self.output.clone())),
            SinkStrategy::Buffered => Box::new(BufferedSink::new(worker_id, self.output.clone())),
            SinkStrategy::Centralized => Box::new(CentralizedSink::new(self.collection.clone())),
        }
    }

    /// Final reporting once every worker has joined.
    ///
    /// Centralized runs drain the collection and write it in insertion order;
    /// the other strategies have already written everything. Returns the total
    /// number of records published during the run.
    pub fn report(&self) -> io::Result<u64> {
        if self.strategy == SinkStrategy::Centralized && !self.collection.is_empty() {
            let records = self.collection.drain();
            tracing::debug!("Draining {} collected record(s)", records.len());
            self.output.write_batch(&records)?;
        }

        self.output.flush()?;
        Ok(self.output.records_written())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{self, Write};
    use std::sync::Arc;

    use parking_lot::Mutex;

    /// In-memory writer whose clones share one buffer
    #[derive(Clone, Default)]
    pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        pub(crate) fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            self.text().lines().map(str::to_owned).collect()
        }

        /// Prime values of every text-format line, in output order
        pub(crate) fn values(&self) -> Vec<u64> {
            self.lines()
                .iter()
                .filter_map(|line| line.rsplit_once("Found prime: "))
                .map(|(_, value)| value.parse().unwrap())
                .collect()
        }

        /// Worker id of every text-format line, in output order
        pub(crate) fn workers(&self) -> Vec<usize> {
            self.lines()
                .iter()
                .filter_map(|line| line.strip_prefix("[Worker "))
                .filter_map(|rest| rest.split_once(']'))
                .map(|(id, _)| id.parse().unwrap())
                .collect()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
