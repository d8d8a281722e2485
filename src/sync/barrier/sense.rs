/*!
 * Sense-Flip Barrier
 *
 * Central counter plus a global sense word. An arriving thread snapshots
 * the sense, increments the counter, and spins until the sense no longer
 * matches its snapshot. The last arrival resets the counter and flips the
 * sense (bitwise complement), releasing everyone at once. Flipping between
 * two states is what makes the instance reusable: a phase-k snapshot can
 * never equal the phase-k release value.
 */

use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reusable central-counter barrier released by a sense flip
pub struct SenseBarrier {
    /// Threads currently spinning at the barrier.
    /// Padded so arrival traffic does not invalidate the sense line.
    spinning: CachePadded<AtomicUsize>,
    /// Phase parity word, complemented on every release.
    sense: CachePadded<AtomicUsize>,
}

impl SenseBarrier {
    pub const fn new() -> Self {
        Self {
            spinning: CachePadded::new(AtomicUsize::new(0)),
            sense: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Block until the last of `num_threads` callers reaches this point.
    ///
    /// `relax` is invoked on every spin iteration.
    #[inline]
    pub fn wait(&self, num_threads: usize, mut relax: impl FnMut()) {
        debug_assert!(num_threads > 0);
        let my_sense = self.sense.load(Ordering::Relaxed);
        if self.spinning.fetch_add(1, Ordering::AcqRel) < num_threads - 1 {
            // Wait until the last thread arrives.
            while self.sense.load(Ordering::Acquire) == my_sense {
                relax();
            }
        } else {
            // Last arrival: reset the counter, then publish the flip.
            // The release store pairs with the acquire loads above, so
            // the reset is visible before any waiter leaves the phase.
            self.spinning.store(0, Ordering::Relaxed);
            self.sense.store(!my_sense, Ordering::Release);
        }
    }
}

impl Default for SenseBarrier {
    fn default() -> Self {
        Self::new()
    }
}
