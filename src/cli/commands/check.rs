use std::num::NonZeroUsize;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::primality::{PrimalityTester, TesterMode};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Number to test
    pub number: u64,

    /// Helper tasks sharing the divisor checks (defaults to available cores)
    #[arg(long)]
    pub helpers: Option<NonZeroUsize>,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let helpers = args.helpers.unwrap_or_else(available_cores);
    let tester = tester_for(helpers);

    let started = Instant::now();
    let prime = tester.is_prime(args.number);
    tracing::info!(
        "Checked {} with {:?} tester in {:.2?}",
        args.number,
        tester.mode(),
        started.elapsed()
    );

    if prime {
        println!("{} is prime", args.number);
    } else {
        println!("{} is not prime", args.number);
    }
    Ok(())
}

/// A single helper is just the sequential loop
fn tester_for(helpers: NonZeroUsize) -> PrimalityTester {
    let mode = if helpers.get() == 1 {
        TesterMode::Sequential
    } else {
        TesterMode::Nested
    };
    PrimalityTester::from_mode(mode, helpers)
}

fn available_cores() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}
