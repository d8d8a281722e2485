/*!
 * Lockstep
 *
 * Reusable concurrency primitives for shared-memory multicore machines,
 * plus a family of segmented bitonic sorts that exercise them under
 * realistic contention:
 * - Reusable spin barriers (sense-flip and step-counter) with pluggable
 *   wait policies
 * - A minimal thread-safe FIFO task queue
 * - One sorting algorithm, five coordination strategies: sequential,
 *   fork-join, barrier-synchronized, lock-free, and work-stealing
 */

pub mod config;
pub mod core;
pub mod queue;
pub mod sort;
pub mod sync;

pub use crate::core::errors::ConfigError;
pub use config::SortConfig;
pub use queue::{make_queue, BlockingTaskQueue, QueueKind, Task, TaskQueue};
pub use sort::{sort, SortMode};
pub use sync::{make_barrier, Barrier, BarrierKind, SenseBarrier, StepBarrier, WaitPolicy};
