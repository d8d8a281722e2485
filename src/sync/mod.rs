/*!
 * Synchronization Primitives
 *
 * Spin-based rendezvous for threads that coordinate through shared memory:
 * - `WaitPolicy`: what a spinning thread does on every loop iteration
 * - `Barrier`: reusable N-thread rendezvous in two flavors (sense, step)
 *
 * # Design: Enum Dispatch
 *
 * There are exactly two barrier variants and both are final, so the
 * `Barrier` type is an enum over concrete implementations rather than a
 * trait object. Calls monomorphize and inline; the wait-policy slot stays
 * a generic closure so callers can do productive work while spinning.
 */

mod barrier;
mod policy;

pub use barrier::{make_barrier, Barrier, BarrierKind, SenseBarrier, StepBarrier};
pub use policy::WaitPolicy;
