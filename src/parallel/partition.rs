use std::fmt;
use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

/// A contiguous, inclusive slice of the search space owned by one worker.
///
/// A segment with `start > end` is empty. `partition` never returns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub worker_id: usize,
    pub start: u64,
    pub end: u64,
}

impl Segment {
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of values covered by this segment
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Every value in the segment, ascending. Yields nothing for an empty segment.
    pub fn candidates(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Split `[1, limit]` into `parts` contiguous segments and return the
/// non-empty ones.
///
/// Every segment gets `limit / parts` values except the last one, which also
/// absorbs the remainder. When `parts > limit` every segment but the last
/// comes out empty, so only the last one is built: it keeps its worker id and
/// covers the whole range. At most `min(parts, limit)` segments are returned.
///
/// # Example
/// ```rust
/// use std::num::NonZeroUsize;
/// use primeforge::parallel::partition;
///
/// let segments = partition(NonZeroUsize::new(4).unwrap(), 20);
/// let bounds: Vec<_> = segments.iter().map(|s| (s.start, s.end)).collect();
/// assert_eq!(bounds, vec![(1, 5), (6, 10), (11, 15), (16, 20)]);
/// ```
pub fn partition(parts: NonZeroUsize, limit: u64) -> Vec<Segment> {
    let parts = parts.get();
    let segment_size = limit / parts as u64;
    let last = parts - 1;
    let first = if segment_size == 0 { last } else { 0 };

    (first..parts)
        .map(|worker_id| {
            let index = worker_id as u64;
            let start = index * segment_size + 1;
            let end = if worker_id == last {
                limit
            } else {
                (index + 1) * segment_size
            };
            Segment {
                worker_id,
                start,
                end,
            }
        })
        .filter(|segment| !segment.is_empty())
        .collect()
}
