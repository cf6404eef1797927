//! Console output for banners and summaries
//!
//! Prime records never pass through here; they go through the run's
//! `SharedOutput`. This is only the human-facing frame around a run.

use console::style;

use crate::parallel::Segment;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("{}", style(title).bold().underlined());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<12} {}", style(key).dim(), styled_value);
        }
    }

    /// One line per worker about to start, verbose only
    pub fn spawn(&self, segment: &Segment) {
        if self.verbose && !self.quiet {
            println!(
                "{} Spawning Worker {} --> Range: {} to {}",
                style("[Main]").cyan(),
                segment.worker_id,
                segment.start,
                segment.end
            );
        }
    }

    /// Print a section separator
    pub fn separator(&self) {
        if !self.quiet {
            println!("{}", style("─".repeat(50)).dim());
        }
    }
}
