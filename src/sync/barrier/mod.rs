/*!
 * Thread Barriers
 *
 * A barrier stops every arriving thread until the declared number of
 * participants has arrived, then releases them all at once. Both variants
 * here are centralized counter barriers and differ only in how the release
 * is announced:
 * - [`SenseBarrier`]: the last arrival flips a shared sense word
 * - [`StepBarrier`]: the last arrival increments a shared step counter
 *
 * # Contract
 *
 * - **Reusable**: one instance serves an unbounded sequence of phases, and
 *   successive phases may declare different participant counts, as long as
 *   each phase completes before the next begins.
 * - **Memory order**: everything a thread did before entering `wait` in
 *   phase k is visible to every thread after it returns from `wait` in
 *   phase k (the last arrival's release store synchronizes with each
 *   waiter's acquire load).
 * - **Liveness**: every declared participant must eventually call `wait`;
 *   there is no timeout. Calling with fewer participants than declared
 *   hangs the callers.
 */

mod sense;
mod step;

pub use sense::SenseBarrier;
pub use step::StepBarrier;

use crate::sync::WaitPolicy;

/// Barrier variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarrierKind {
    /// Central counter, sense-flip release
    #[default]
    Sense,
    /// Central counter, step-increment release
    Step,
}

impl BarrierKind {
    /// Parse from a symbolic tag; unknown tags yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sense" | "barrier_sense" => Some(Self::Sense),
            "step" | "barrier_step" => Some(Self::Step),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sense => "sense",
            Self::Step => "step",
        }
    }
}

impl std::fmt::Display for BarrierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reusable N-thread rendezvous (enum dispatch over the two variants)
pub enum Barrier {
    Sense(SenseBarrier),
    Step(StepBarrier),
}

impl Barrier {
    pub fn new(kind: BarrierKind) -> Self {
        match kind {
            BarrierKind::Sense => Self::Sense(SenseBarrier::new()),
            BarrierKind::Step => Self::Step(StepBarrier::new()),
        }
    }

    /// Block until `num_threads` callers have arrived at this phase.
    ///
    /// `relax` runs on every spin iteration; it may do arbitrary work
    /// (yield, pause, or drain a task queue) but must return.
    #[inline]
    pub fn wait(&self, num_threads: usize, relax: impl FnMut()) {
        match self {
            Self::Sense(b) => b.wait(num_threads, relax),
            Self::Step(b) => b.wait(num_threads, relax),
        }
    }

    /// `wait` with a named policy instead of a closure
    #[inline]
    pub fn wait_with(&self, num_threads: usize, policy: WaitPolicy) {
        self.wait(num_threads, || policy.relax());
    }

    pub const fn kind(&self) -> BarrierKind {
        match self {
            Self::Sense(_) => BarrierKind::Sense,
            Self::Step(_) => BarrierKind::Step,
        }
    }
}

impl Default for Barrier {
    fn default() -> Self {
        Self::new(BarrierKind::default())
    }
}

/// Factory over symbolic tags (`"sense"`, `"step"`).
///
/// Unknown tags produce `None`, never a panic.
pub fn make_barrier(tag: &str) -> Option<Barrier> {
    BarrierKind::parse(tag).map(Barrier::new)
}
