//! Work distribution primitives
//!
//! This module knows nothing about primes. It provides the two pieces every run
//! needs to spread work over threads:
//!
//! - **Partitioning**: `partition` splits `[1, limit]` into contiguous,
//!   disjoint segments, one per worker. The same rule is reused on divisor
//!   indices by the nested primality tester.
//! - **Task groups**: `TaskGroup` runs one scoped thread per task, joins every
//!   thread and surfaces panics and errors to the caller.
//!
//! ```text
//! ┌──────────────┐    ┌─────────────┐    ┌──────────────┐
//! │ Orchestrator │───▶│ partition() │───▶│  TaskGroup   │
//! │              │    │             │    │              │
//! │ • settings   │    │ • segments  │    │ • spawn      │
//! │ • sink       │    │ • skip empty│    │ • join all   │
//! └──────────────┘    └─────────────┘    └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use primeforge::parallel::{partition, TaskGroup};
//!
//! let segments = partition(NonZeroUsize::new(3).unwrap(), 30);
//! let tasks: Vec<_> = segments.into_iter().map(|s| (s.worker_id, s)).collect();
//!
//! let sizes = TaskGroup::new("example")
//!     .execute(tasks, |segment| Ok(segment.len()))
//!     .unwrap();
//! assert_eq!(sizes.iter().sum::<u64>(), 30);
//! ```

pub mod group;
pub mod partition;

pub use group::TaskGroup;
pub use partition::{Segment, partition};
