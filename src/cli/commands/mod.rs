use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

pub mod check;
pub mod run;

#[derive(Parser)]
#[command(
    name = "primeforge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Concurrent prime enumeration with interchangeable result aggregation",
    long_about = "primeforge splits [1, limit] into one segment per worker thread, tests every \
                  candidate for primality and publishes each prime through the selected \
                  aggregation strategy (immediate, buffered or centralized)."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress banners and logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// key=value configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        env = "PRIMEFORGE_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate every prime up to the configured limit (default)
    Run(run::RunArgs),
    /// Test a single number with the nested tester
    Check(check::CheckArgs),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        crate::telemetry::init(self.verbose, self.quiet);

        let verbose = self.verbose > 0;
        match self.command {
            Some(Commands::Run(args)) => run::execute(args, &self.config, verbose, self.quiet),
            Some(Commands::Check(args)) => check::execute(args),
            None => run::execute(run::RunArgs::default(), &self.config, verbose, self.quiet),
        }
    }
}
