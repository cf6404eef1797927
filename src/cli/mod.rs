//! Command-line interface
//!
//! `primeforge [run]` enumerates primes, `primeforge check <N>` tests one
//! number. Global flags (`-v`, `-q`, `--config`) apply to both.

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::Output;
