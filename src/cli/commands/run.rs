use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;

use crate::cli::Output;
use crate::config::{Overrides, Settings};
use crate::orchestrator::{Orchestrator, RunReport};
use crate::primality::TesterMode;
use crate::record::format_timestamp;
use crate::sink::{RecordFormat, SharedOutput, SinkStrategy};

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Number of worker threads (overrides `threads`)
    #[arg(short, long)]
    pub threads: Option<u64>,

    /// Inclusive upper bound of the search (overrides `limit`)
    #[arg(short = 'n', long)]
    pub limit: Option<u64>,

    /// How workers publish their primes
    #[arg(short, long, value_enum)]
    pub strategy: Option<SinkStrategy>,

    /// Primality tester used for every candidate
    #[arg(long, value_enum)]
    pub tester: Option<TesterMode>,

    /// Helper tasks per candidate for the nested tester
    #[arg(long)]
    pub helpers: Option<u64>,

    /// Record line format
    #[arg(short, long, value_enum)]
    pub format: Option<RecordFormat>,
}

impl RunArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            threads: self.threads,
            limit: self.limit,
            strategy: self.strategy,
            tester: self.tester,
            helpers: self.helpers,
            format: self.format,
        }
    }
}

pub fn execute(args: RunArgs, config: &Path, verbose: bool, quiet: bool) -> Result<()> {
    let settings = Settings::load(config, &args.overrides())
        .with_context(|| format!("Failed to load configuration from {}", config.display()))?;

    // JSON output stays machine-readable: no banners around it
    let output = Output::new(verbose, quiet || settings.format == RecordFormat::Json);

    output.header("Prime search");
    output.key_value("Threads", &settings.threads.to_string(), false);
    output.key_value("Limit", &settings.limit.to_string(), false);
    output.key_value("Strategy", settings.strategy.as_str(), false);
    output.key_value("Tester", &describe_tester(&settings), false);
    output.key_value("Start time", &format_timestamp(&Local::now()), false);
    output.separator();

    let mut orchestrator = Orchestrator::new(settings);
    for segment in orchestrator.partition() {
        output.spawn(segment);
    }

    let records = SharedOutput::stdout(orchestrator.settings().format);
    let report = orchestrator
        .run(records)
        .context("Prime search failed")?;

    print_summary(&output, &report);
    Ok(())
}

fn describe_tester(settings: &Settings) -> String {
    match settings.tester {
        TesterMode::Sequential => "sequential".to_string(),
        TesterMode::Nested => format!("nested ({} helpers)", settings.helpers),
    }
}

fn print_summary(output: &Output, report: &RunReport) {
    output.separator();
    output.key_value("End time", &format_timestamp(&report.finished_at), false);
    output.key_value("Elapsed", &format!("{:.3?}", report.elapsed), false);
    output.key_value("Workers", &report.workers.len().to_string(), false);
    output.key_value("Primes", &report.primes_reported.to_string(), true);
}
