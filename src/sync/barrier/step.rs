/*!
 * Step-Counter Barrier
 *
 * Same arrival protocol as the sense barrier, but the release is announced
 * by incrementing a step counter (the number of phases completed so far)
 * instead of flipping a parity word. A waiter spins while the step still
 * equals its snapshot. `AtomicUsize::fetch_add` wraps on overflow by
 * definition, so the instance stays reusable past `usize::MAX` phases: a
 * snapshot only ever equals the current step, never the next one.
 */

use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reusable central-counter barrier released by a step increment
pub struct StepBarrier {
    /// Threads currently spinning at the barrier.
    spinning: CachePadded<AtomicUsize>,
    /// Phases completed so far; wraps around, which is fine.
    step: CachePadded<AtomicUsize>,
}

impl StepBarrier {
    pub const fn new() -> Self {
        Self {
            spinning: CachePadded::new(AtomicUsize::new(0)),
            step: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Block until the last of `num_threads` callers reaches this point.
    #[inline]
    pub fn wait(&self, num_threads: usize, mut relax: impl FnMut()) {
        debug_assert!(num_threads > 0);
        let my_step = self.step.load(Ordering::Relaxed);
        if self.spinning.fetch_add(1, Ordering::AcqRel) < num_threads - 1 {
            // Wait until the last thread arrives.
            while self.step.load(Ordering::Acquire) == my_step {
                relax();
            }
        } else {
            // Last arrival: reset the counter, then publish the new step.
            self.spinning.store(0, Ordering::Relaxed);
            self.step.fetch_add(1, Ordering::Release);
        }
    }
}

impl Default for StepBarrier {
    fn default() -> Self {
        Self::new()
    }
}
