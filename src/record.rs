use chrono::{DateTime, Local};
use serde::Serialize;

/// Timestamp layout used in text output, millisecond precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One discovered prime.
///
/// Built once by the worker that found it and moved into a sink; there are no
/// setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimeRecord {
    value: u64,
    worker_id: usize,
    discovered_at: DateTime<Local>,
}

impl PrimeRecord {
    /// Stamp a freshly found prime with the current local time
    pub fn discovered(value: u64, worker_id: usize) -> Self {
        Self::at(value, worker_id, Local::now())
    }

    pub fn at(value: u64, worker_id: usize, discovered_at: DateTime<Local>) -> Self {
        Self {
            value,
            worker_id,
            discovered_at,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    pub fn discovered_at(&self) -> DateTime<Local> {
        self.discovered_at
    }
}

/// Format a timestamp the way report and banner lines show it
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
