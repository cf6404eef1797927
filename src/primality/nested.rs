use std::num::NonZeroUsize;

use super::cancel::CancellationToken;
use super::{divisor_candidates, quick_verdict, wheel_divisor};
use crate::parallel::{Segment, partition};

/// Test `n` by fanning the 6k±1 divisor scan out over `helpers` tasks.
///
/// The divisor candidates `5, 11, 17, ...` up to `⌊√n⌋` are numbered from 1 and
/// split with the same contiguous rule the workers use for the search space,
/// so no more helpers are spawned than there are candidates.
/// Each helper runs as a task inside a `rayon::scope`, which joins them all
/// before this function returns. The first helper to find a factor cancels the
/// shared token; the others notice on their next iteration and stop.
pub fn is_prime_nested(n: u64, helpers: NonZeroUsize) -> bool {
    if let Some(verdict) = quick_verdict(n) {
        return verdict;
    }

    let candidates = divisor_candidates(n.isqrt());
    if candidates == 0 {
        return true;
    }

    let token = CancellationToken::new();
    let ranges = partition(helpers, candidates);

    rayon::scope(|s| {
        for range in ranges {
            let token = &token;
            s.spawn(move |_| scan_divisors(n, range, token));
        }
    });

    !token.is_cancelled()
}

/// Scan one helper's slice of divisor indices. Empty slices return at once.
fn scan_divisors(n: u64, range: Segment, token: &CancellationToken) {
    for index in range.candidates() {
        if token.is_cancelled() {
            return;
        }

        let divisor = wheel_divisor(index);
        if n % divisor == 0 || n % (divisor + 2) == 0 {
            token.cancel();
            return;
        }
    }
}
