//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for banners
//! and prime records. `RUST_LOG` wins over the `-v` count when set.

use tracing_subscriber::EnvFilter;

/// Filter directive for a given number of `-v` flags
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Quiet mode installs nothing.
pub fn init(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A subscriber may already exist when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(verbose >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}
