//! Worker units
//!
//! A worker owns one segment and walks it strictly ascending, handing every
//! prime it finds to its sink. It finalizes the sink exactly once, after the
//! last candidate, and reports what it did as a [`WorkerSummary`].

use std::time::{Duration, Instant};

use crate::error::RunError;
use crate::parallel::Segment;
use crate::primality::PrimalityTester;
use crate::record::PrimeRecord;
use crate::sink::ResultSink;

pub struct WorkerUnit {
    segment: Segment,
    tester: PrimalityTester,
    sink: Box<dyn ResultSink>,
}

/// What one worker did during a run
#[derive(Debug, Clone)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub segment: Segment,
    pub primes_found: u64,
    pub elapsed: Duration,
}

impl WorkerUnit {
    pub fn new(segment: Segment, tester: PrimalityTester, sink: Box<dyn ResultSink>) -> Self {
        Self {
            segment,
            tester,
            sink,
        }
    }

    pub fn worker_id(&self) -> usize {
        self.segment.worker_id
    }

    /// Test every candidate in the segment, then finalize the sink.
    ///
    /// A failing sink write stops the worker and is returned to the caller.
    pub fn run(mut self) -> Result<WorkerSummary, RunError> {
        let worker_id = self.worker_id();
        let started = Instant::now();
        tracing::debug!("Worker {} started on {}", worker_id, self.segment);

        let mut primes_found = 0;
        for candidate in self.segment.candidates() {
            if self.tester.is_prime(candidate) {
                self.sink.ingest(PrimeRecord::discovered(candidate, worker_id))?;
                primes_found += 1;
            }
        }
        self.sink.finalize(worker_id)?;

        let elapsed = started.elapsed();
        tracing::debug!(
            "Worker {} finished {} in {:.2?} ({} primes)",
            worker_id,
            self.segment,
            elapsed,
            primes_found
        );

        Ok(WorkerSummary {
            worker_id,
            segment: self.segment,
            primes_found,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::num::NonZeroUsize;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::sink::testing::Capture;
    use crate::sink::{Aggregation, RecordFormat, SharedOutput, SinkStrategy};

    #[derive(Debug, PartialEq)]
    enum Event {
        Ingest(u64, usize),
        Finalize(usize),
    }

    /// Sink that remembers every call it receives
    struct Recorder(Arc<Mutex<Vec<Event>>>);

    impl ResultSink for Recorder {
        fn ingest(&mut self, record: PrimeRecord) -> io::Result<()> {
            self.0.lock().push(Event::Ingest(record.value(), record.worker_id()));
            Ok(())
        }

        fn finalize(&mut self, worker_id: usize) -> io::Result<()> {
            self.0.lock().push(Event::Finalize(worker_id));
            Ok(())
        }
    }

    /// Sink whose output is gone
    struct Broken;

    impl ResultSink for Broken {
        fn ingest(&mut self, _record: PrimeRecord) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn finalize(&mut self, _worker_id: usize) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_ascending_ingest_then_single_finalize() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let segment = Segment { worker_id: 2, start: 11, end: 30 };
        let worker = WorkerUnit::new(segment, PrimalityTester::Sequential, Box::new(Recorder(events.clone())));

        let summary = worker.run().unwrap();
        assert_eq!(summary.worker_id, 2);
        assert_eq!(summary.primes_found, 6);

        let events = events.lock();
        assert_eq!(
            *events,
            vec![
                Event::Ingest(11, 2),
                Event::Ingest(13, 2),
                Event::Ingest(17, 2),
                Event::Ingest(19, 2),
                Event::Ingest(23, 2),
                Event::Ingest(29, 2),
                Event::Finalize(2),
            ]
        );
    }

    #[test]
    fn test_nested_tester_finds_same_primes() {
        let segment = Segment { worker_id: 0, start: 1, end: 2_000 };

        let sequential = Capture::default();
        let aggregation = Aggregation::new(
            SinkStrategy::Immediate,
            SharedOutput::new(sequential.clone(), RecordFormat::Text),
        );
        WorkerUnit::new(segment, PrimalityTester::Sequential, aggregation.sink_for(0))
            .run()
            .unwrap();

        let nested = Capture::default();
        let aggregation = Aggregation::new(
            SinkStrategy::Immediate,
            SharedOutput::new(nested.clone(), RecordFormat::Text),
        );
        let tester = PrimalityTester::Nested {
            helpers: NonZeroUsize::new(3).unwrap(),
        };
        WorkerUnit::new(segment, tester, aggregation.sink_for(0)).run().unwrap();

        assert_eq!(sequential.values(), nested.values());
        assert_eq!(sequential.values().len(), 303);
    }

    #[test]
    fn test_empty_segment_only_finalizes() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let segment = Segment { worker_id: 1, start: 1, end: 0 };
        let summary = WorkerUnit::new(segment, PrimalityTester::Sequential, Box::new(Recorder(events.clone())))
            .run()
            .unwrap();

        assert_eq!(summary.primes_found, 0);
        assert_eq!(*events.lock(), vec![Event::Finalize(1)]);
    }

    #[test]
    fn test_sink_failure_is_returned() {
        let segment = Segment { worker_id: 0, start: 1, end: 10 };
        let result = WorkerUnit::new(segment, PrimalityTester::Sequential, Box::new(Broken)).run();
        assert!(matches!(result, Err(RunError::Output(_))));
    }
}
