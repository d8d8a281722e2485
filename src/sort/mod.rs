/*!
 * Segmented Bitonic Sort
 *
 * One algorithm, five coordination strategies. The input is cut into
 * power-of-two segments; each segment is sorted locally, then a bitonic
 * merging network combines pairs of segments over
 * `log2(num_segments) * (log2(num_segments) + 1) / 2` stages until the
 * whole range is ascending. Within a stage all merges touch disjoint
 * segment pairs, so the only synchronization problem is the stage
 * boundary, and each submodule solves it differently:
 *
 * - [`sequential`]: one thread, no shared state
 * - [`forkjoin`]: rayon pool, stage joins are the implicit barrier
 * - [`blocking`]: explicit reusable barrier between stages
 * - [`lockfree`]: no barrier; pairwise waits on per-segment stage counters
 * - [`stealing`]: blocking plus per-worker task queues drained by peers,
 *   and a wait-free refinement that drops the barrier entirely
 */

pub mod blocking;
pub mod forkjoin;
pub mod lockfree;
pub mod merge;
pub mod sequential;
pub mod stealing;

mod plan;
mod shared;

pub(crate) use plan::BlockPlan;
pub(crate) use shared::SharedSlice;

use crate::sync::WaitPolicy;
use log::debug;

/// Coordination strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// One thread runs every stage
    #[default]
    Sequential,
    /// Stages fan out on a rayon pool
    ForkJoin,
    /// Workers rendezvous at an explicit barrier between stages
    Barrier,
    /// Pairwise synchronization on per-segment stage counters
    LockFree,
    /// Barrier mode plus task queues; waiting threads steal peer work
    Stealing,
    /// Stealing without the barrier, guarded by per-thread stage counters
    WaitFree,
}

impl SortMode {
    /// Parse from a symbolic tag; unknown tags yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sequential" => Some(Self::Sequential),
            "forkjoin" | "fork_join" => Some(Self::ForkJoin),
            "barrier" => Some(Self::Barrier),
            "lockfree" | "lock_free" => Some(Self::LockFree),
            "stealing" => Some(Self::Stealing),
            "waitfree" | "wait_free" => Some(Self::WaitFree),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::ForkJoin => "forkjoin",
            Self::Barrier => "barrier",
            Self::LockFree => "lockfree",
            Self::Stealing => "stealing",
            Self::WaitFree => "waitfree",
        }
    }

    /// All modes, in dispatch order
    pub const fn all() -> [Self; 6] {
        [
            Self::Sequential,
            Self::ForkJoin,
            Self::Barrier,
            Self::LockFree,
            Self::Stealing,
            Self::WaitFree,
        ]
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort `data` in place, ascending.
///
/// Preconditions (debug-asserted, not validated in release):
/// - `data.len()` is a positive multiple of `segment_size`
/// - `segment_size` and `data.len() / segment_size` are powers of two
/// - `num_segments % num_threads == 0` for the threaded modes
///
/// `num_threads` and `policy` are ignored by the sequential mode;
/// `policy` is also ignored by fork-join (rayon parks its own workers)
/// and wait-free (its spin loops steal instead of relaxing).
pub fn sort<T: Ord + Copy + Send + Sync>(
    data: &mut [T],
    mode: SortMode,
    num_threads: usize,
    segment_size: usize,
    policy: WaitPolicy,
) {
    if data.len() <= 1 {
        return;
    }
    debug_assert!(segment_size.is_power_of_two());
    debug_assert_eq!(data.len() % segment_size, 0);
    debug_assert!((data.len() / segment_size).is_power_of_two());
    debug!(
        "bitonic sort: mode={} len={} segment_size={} num_threads={} policy={}",
        mode,
        data.len(),
        segment_size,
        num_threads,
        policy
    );
    match mode {
        SortMode::Sequential => sequential::sort(data, segment_size),
        SortMode::ForkJoin => forkjoin::sort(data, num_threads, segment_size),
        SortMode::Barrier => blocking::sort(data, num_threads, segment_size, policy),
        SortMode::LockFree => lockfree::sort(data, num_threads, segment_size, policy),
        SortMode::Stealing => stealing::sort(data, num_threads, segment_size, policy),
        SortMode::WaitFree => stealing::sort_waitfree(data, num_threads, segment_size),
    }
}
