//! Primality testing
//!
//! Both testers use 6k±1 wheel trial division and are exact over the whole
//! `u64` domain:
//!
//! 1. `n ≤ 1` is not prime, `2` and `3` are
//! 2. multiples of 2 or 3 are not prime
//! 3. otherwise try `d` and `d + 2` for `d = 5, 11, 17, ...` while `d ≤ ⌊√n⌋`
//!
//! The sequential tester walks step 3 in one loop. The nested tester splits the
//! divisor candidates across helper tasks that cancel each other cooperatively
//! (see [`nested`]).

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

pub mod cancel;
pub mod nested;

pub use cancel::CancellationToken;
pub use nested::is_prime_nested;

/// Which tester a run uses for every candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TesterMode {
    /// Single-threaded trial division inside each worker
    #[default]
    Sequential,
    /// Divisor checks fanned out over helper tasks per candidate
    Nested,
}

/// A primality test strategy, cheap to copy into every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimalityTester {
    Sequential,
    Nested { helpers: NonZeroUsize },
}

impl PrimalityTester {
    pub fn from_mode(mode: TesterMode, helpers: NonZeroUsize) -> Self {
        match mode {
            TesterMode::Sequential => PrimalityTester::Sequential,
            TesterMode::Nested => PrimalityTester::Nested { helpers },
        }
    }

    pub fn is_prime(&self, n: u64) -> bool {
        match self {
            PrimalityTester::Sequential => is_prime(n),
            PrimalityTester::Nested { helpers } => is_prime_nested(n, *helpers),
        }
    }

    pub fn mode(&self) -> TesterMode {
        match self {
            PrimalityTester::Sequential => TesterMode::Sequential,
            PrimalityTester::Nested { .. } => TesterMode::Nested,
        }
    }
}

/// Sequential 6k±1 trial division.
pub fn is_prime(n: u64) -> bool {
    if let Some(verdict) = quick_verdict(n) {
        return verdict;
    }

    let limit = n.isqrt();
    let mut divisor = 5;
    while divisor <= limit {
        if n % divisor == 0 || n % (divisor + 2) == 0 {
            return false;
        }
        divisor += 6;
    }
    true
}

/// Answer small numbers and multiples of 2 or 3 without any division loop.
pub(crate) fn quick_verdict(n: u64) -> Option<bool> {
    if n <= 1 {
        Some(false)
    } else if n <= 3 {
        Some(true)
    } else if n % 2 == 0 || n % 3 == 0 {
        Some(false)
    } else {
        None
    }
}

/// How many wheel divisors `5 + 6k` are `≤ sqrt_limit`.
pub(crate) fn divisor_candidates(sqrt_limit: u64) -> u64 {
    if sqrt_limit < 5 {
        0
    } else {
        (sqrt_limit - 5) / 6 + 1
    }
}

/// The wheel divisor with 1-based position `index`: 5, 11, 17, ...
pub(crate) fn wheel_divisor(index: u64) -> u64 {
    5 + 6 * (index - 1)
}
