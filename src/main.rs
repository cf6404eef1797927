use anyhow::Result;
use clap::Parser;

use primeforge::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
