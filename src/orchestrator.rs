//! Run orchestration
//!
//! ```text
//! Init ─▶ ConfigLoaded ─▶ Partitioned ─▶ Running ─▶ Joined ─▶ Reported ─▶ Terminal
//! ```
//!
//! `Init` and `Terminal` belong to the CLI: an `Orchestrator` only exists once
//! settings have been loaded and validated, and the process exits after the
//! report. Everything in between happens here.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::config::Settings;
use crate::error::RunError;
use crate::parallel::{Segment, TaskGroup, partition};
use crate::sink::{Aggregation, SharedOutput};
use crate::worker::{WorkerSummary, WorkerUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ConfigLoaded,
    Partitioned,
    Running,
    Joined,
    Reported,
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Non-empty segments that got a worker
    pub segments: Vec<Segment>,
    /// One summary per worker, in worker id order
    pub workers: Vec<WorkerSummary>,
    pub primes_reported: u64,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub elapsed: Duration,
}

pub struct Orchestrator {
    settings: Settings,
    phase: Phase,
    segments: Vec<Segment>,
}

impl Orchestrator {
    pub fn new(settings: Settings) -> Self {
        tracing::debug!("Phase: ConfigLoaded ({:?})", settings);
        Self {
            settings,
            phase: Phase::ConfigLoaded,
            segments: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Split the search range into the segments worth a worker
    pub fn partition(&mut self) -> &[Segment] {
        let segments = partition(self.settings.threads, self.settings.limit.get());

        let skipped = self.settings.threads.get() - segments.len();
        if skipped > 0 {
            tracing::debug!("Skipping {} empty segment(s)", skipped);
        }

        self.segments = segments;
        self.transition(Phase::Partitioned);
        &self.segments
    }

    /// Spawn one worker per segment, wait for all of them and report.
    ///
    /// Partitions first if that has not happened yet. Blocks until every worker
    /// returns; a panicking or failing worker is reported as a `RunError` once
    /// the rest have been joined.
    pub fn run(&mut self, output: SharedOutput) -> Result<RunReport, RunError> {
        if self.phase != Phase::Partitioned {
            self.partition();
        }

        let available = num_cpus::get();
        if self.segments.len() > available {
            tracing::warn!(
                "Running {} workers on {} available cores",
                self.segments.len(),
                available
            );
        }

        let aggregation = Aggregation::new(self.settings.strategy, output);
        tracing::debug!("Aggregating with the {} strategy", aggregation.strategy());
        let tester = self.settings.tester();
        let tasks: Vec<_> = self
            .segments
            .iter()
            .map(|segment| {
                let sink = aggregation.sink_for(segment.worker_id);
                (segment.worker_id, WorkerUnit::new(*segment, tester, sink))
            })
            .collect();

        let started_at = Local::now();
        let clock = Instant::now();
        self.transition(Phase::Running);

        let workers = TaskGroup::new("primeforge-worker").execute(tasks, WorkerUnit::run)?;
        self.transition(Phase::Joined);

        let primes_reported = aggregation.report()?;
        let elapsed = clock.elapsed();
        let finished_at = Local::now();
        self.transition(Phase::Reported);

        tracing::info!(
            "Reported {} primes from {} workers in {:.2?}",
            primes_reported,
            workers.len(),
            elapsed
        );

        Ok(RunReport {
            segments: self.segments.clone(),
            workers,
            primes_reported,
            started_at,
            finished_at,
            elapsed,
        })
    }

    fn transition(&mut self, next: Phase) {
        tracing::debug!("Phase: {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::num::{NonZeroU64, NonZeroUsize};

    use crate::primality::{TesterMode, is_prime};
    use crate::sink::testing::Capture;
    use crate::sink::{RecordFormat, SinkStrategy};

    const ALL: [SinkStrategy; 3] = [
        SinkStrategy::Immediate,
        SinkStrategy::Buffered,
        SinkStrategy::Centralized,
    ];

    fn settings(threads: usize, limit: u64, strategy: SinkStrategy) -> Settings {
        Settings::new(NonZeroUsize::new(threads).unwrap(), NonZeroU64::new(limit).unwrap())
            .with_strategy(strategy)
    }

    fn run(settings: Settings) -> (RunReport, Capture) {
        let capture = Capture::default();
        let output = SharedOutput::new(capture.clone(), RecordFormat::Text);
        let report = Orchestrator::new(settings).run(output).unwrap();
        (report, capture)
    }

    fn true_primes(limit: u64) -> BTreeSet<u64> {
        (1..=limit).filter(|n| is_prime(*n)).collect()
    }

    #[test]
    fn test_four_workers_up_to_twenty() {
        for strategy in ALL {
            let (report, capture) = run(settings(4, 20, strategy));

            let bounds: Vec<_> = report.segments.iter().map(|s| (s.start, s.end)).collect();
            assert_eq!(bounds, vec![(1, 5), (6, 10), (11, 15), (16, 20)]);

            let mut values = capture.values();
            values.sort_unstable();
            assert_eq!(values, vec![2, 3, 5, 7, 11, 13, 17, 19], "{strategy}");
            assert_eq!(report.primes_reported, 8);
        }
    }

    #[test]
    fn test_every_strategy_reports_each_prime_once() {
        let limit = 1_000;
        let expected = true_primes(limit);

        for strategy in ALL {
            for threads in 1..=16 {
                let (report, capture) = run(settings(threads, limit, strategy));
                let values = capture.values();
                let unique: BTreeSet<u64> = values.iter().copied().collect();

                assert_eq!(values.len(), unique.len(), "{strategy}/{threads}: duplicates");
                assert_eq!(unique, expected, "{strategy}/{threads}: wrong prime set");
                assert_eq!(report.primes_reported, expected.len() as u64);

                let found: u64 = report.workers.iter().map(|w| w.primes_found).sum();
                assert_eq!(found, expected.len() as u64);
            }
        }
    }

    #[test]
    fn test_nested_tester_run() {
        let settings = settings(3, 500, SinkStrategy::Buffered)
            .with_tester(TesterMode::Nested, NonZeroUsize::new(4).unwrap());
        let (report, capture) = run(settings);

        let unique: BTreeSet<u64> = capture.values().into_iter().collect();
        assert_eq!(unique, true_primes(500));
        assert_eq!(report.workers.len(), 3);
    }

    #[test]
    fn test_more_workers_than_values() {
        let (report, capture) = run(settings(8, 3, SinkStrategy::Immediate));

        assert_eq!(report.segments.len(), 1);
        assert_eq!(report.workers.len(), 1);
        assert_eq!(report.workers[0].worker_id, 7);
        assert_eq!(capture.workers(), vec![7, 7]);

        let mut values = capture.values();
        values.sort_unstable();
        assert_eq!(values, vec![2, 3]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_huge_thread_count_spawns_one_worker() {
        let threads = 1usize << 40;
        let mut orchestrator = Orchestrator::new(settings(threads, 10, SinkStrategy::Immediate));
        assert_eq!(
            orchestrator.partition(),
            &[Segment { worker_id: threads - 1, start: 1, end: 10 }]
        );

        let capture = Capture::default();
        let report = orchestrator
            .run(SharedOutput::new(capture.clone(), RecordFormat::Text))
            .unwrap();
        assert_eq!(report.workers.len(), 1);
        assert_eq!(report.primes_reported, 4);
    }

    #[test]
    fn test_phases() {
        let mut orchestrator = Orchestrator::new(settings(2, 10, SinkStrategy::Centralized));
        assert_eq!(orchestrator.phase(), Phase::ConfigLoaded);

        assert_eq!(orchestrator.partition().len(), 2);
        assert_eq!(orchestrator.phase(), Phase::Partitioned);

        let output = SharedOutput::new(Capture::default(), RecordFormat::Text);
        let report = orchestrator.run(output).unwrap();
        assert_eq!(orchestrator.phase(), Phase::Reported);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn test_limit_one_reports_nothing() {
        let (report, capture) = run(settings(1, 1, SinkStrategy::Centralized));
        assert_eq!(report.primes_reported, 0);
        assert!(capture.text().is_empty());
    }
}
