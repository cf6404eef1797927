//! Error types for primeforge.
//!
//! Two families exist:
//! - `ConfigError`: anything wrong with the configuration. Always fatal, always
//!   raised before a single worker is spawned.
//! - `RunError`: faults that surface once workers are running, either a worker
//!   thread panicking or the shared output stream refusing writes.
//!
//! An empty partition segment is not an error; the orchestrator skips it.

use std::io;
use std::path::PathBuf;

/// Configuration could not be turned into valid run settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required key is absent from every configuration layer.
    #[error("missing required key '{key}'")]
    MissingKey { key: &'static str },

    /// A numeric key holds something that is not an integer.
    #[error("value for '{key}' is not an integer: {detail}")]
    NotNumeric { key: String, detail: String },

    /// A numeric key is zero or negative.
    #[error("value for '{key}' must be positive, got {value}")]
    NotPositive { key: &'static str, value: i64 },

    /// A non-numeric key holds an unrecognized value.
    #[error("invalid value for '{key}': {detail}")]
    InvalidValue { key: String, detail: String },
}

/// A run failed after workers were started.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A worker thread panicked before returning its summary.
    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker {worker_id}: {source}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: io::Error,
    },

    /// A thread panicked outside of any joined worker task.
    #[error("worker scope panicked")]
    ScopePanicked,

    /// Writing to the shared output failed.
    #[error("failed to write results: {0}")]
    Output(#[from] io::Error),
}
