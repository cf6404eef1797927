//! # primeforge - concurrent prime enumeration
//!
//! primeforge searches `[1, limit]` for primes with a fixed set of worker
//! threads and publishes what it finds through one of three aggregation
//! strategies:
//!
//! - **immediate**: every prime is written under the output lock as soon as it
//!   is found
//! - **buffered**: each worker keeps its primes and writes them as one block
//!   when its segment is done
//! - **centralized**: workers append to a shared collection that is written
//!   after every worker has joined
//!
//! Candidates are tested with 6k±1 trial division, either sequentially inside
//! each worker or with the divisor checks of a single candidate fanned out
//! over helper tasks that cancel each other on the first factor found.
//!
//! ## Quick Start
//!
//! ```bash
//! printf 'threads=4\nlimit=20\n' > config.txt
//! primeforge                      # run with config.txt
//! primeforge run -s buffered -n 100000
//! primeforge check 997 --helpers 4
//! ```
//!
//! ## Library use
//!
//! ```
//! use std::num::{NonZeroU64, NonZeroUsize};
//!
//! use primeforge::config::Settings;
//! use primeforge::orchestrator::Orchestrator;
//! use primeforge::sink::{RecordFormat, SharedOutput, SinkStrategy};
//!
//! let settings = Settings::new(NonZeroUsize::new(4).unwrap(), NonZeroU64::new(20).unwrap())
//!     .with_strategy(SinkStrategy::Centralized);
//!
//! let output = SharedOutput::new(std::io::sink(), RecordFormat::Text);
//! let report = Orchestrator::new(settings).run(output).unwrap();
//! assert_eq!(report.primes_reported, 8);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod parallel;
pub mod primality;
pub mod record;
pub mod sink;
pub mod telemetry;
pub mod worker;

pub use cli::{Cli, Output};
pub use config::Settings;
pub use error::{ConfigError, RunError};
