/*!
 * Stealing Modes
 *
 * Same static segment ownership as the barrier mode, but a worker never
 * runs its merges inline: it enqueues them into its own task queue, drains
 * that queue, and while it waits for peers it drains theirs. Two flavors:
 *
 * - **barrier stealing**: the reusable barrier still marks stage
 *   boundaries, and the wait-policy slot is a steal loop. Each (k, j)
 *   stage is bracketed by two waits: the first acquires merges that peers
 *   stole and finished during the previous stage, the second publishes
 *   this stage's results before anyone advances.
 * - **wait-free stealing**: the barrier is gone. Per-segment counters gate
 *   merges exactly as in lock-free mode, and a per-thread stage counter
 *   gates stealing: a thread drains peer j's queue only while it is
 *   strictly ahead of j, so it never takes work j still needs to finish
 *   its current stage.
 */

use std::sync::atomic::{fence, AtomicUsize, Ordering};
use std::thread;

use crate::queue::{QueueKind, TaskQueue};
use crate::sync::{Barrier, BarrierKind, WaitPolicy};

use super::{merge, BlockPlan, SharedSlice};

/// Pop-and-run until `queues[index]` is empty
fn drain(queues: &[TaskQueue<'_>], index: usize) {
    while let Some(task) = queues[index].pop() {
        task();
    }
}

/// One steal round: visit every peer queue starting after `me`, drain each
fn steal_round(queues: &[TaskQueue<'_>], me: usize, num_threads: usize, policy: WaitPolicy) {
    for peer in me + 1..me + num_threads {
        drain(queues, peer % num_threads);
    }
    policy.relax();
}

/// Barrier-synchronized sort where waiting threads steal queued merges
pub fn sort<T: Ord + Copy + Send + Sync>(
    data: &mut [T],
    num_threads: usize,
    segment_size: usize,
    policy: WaitPolicy,
) {
    let plan = BlockPlan::new(data.len(), segment_size, num_threads);
    let fill = data[0];
    let shared = SharedSlice::new(data);
    let barrier = Barrier::new(BarrierKind::Sense);
    let queues: Vec<TaskQueue<'_>> = (0..num_threads)
        .map(|_| TaskQueue::new(QueueKind::Blocking))
        .collect();

    thread::scope(|s| {
        for worker in 1..num_threads {
            let plan = &plan;
            let barrier = &barrier;
            let queues = &queues[..];
            s.spawn(move || {
                stealing_worker(shared, worker, plan, num_threads, policy, barrier, queues, fill)
            });
        }
        stealing_worker(shared, 0, &plan, num_threads, policy, &barrier, &queues, fill);
    });
}

#[allow(clippy::too_many_arguments)]
fn stealing_worker<'a, T: Ord + Copy + Send + 'a>(
    shared: SharedSlice<'a, T>,
    me: usize,
    plan: &BlockPlan,
    num_threads: usize,
    policy: WaitPolicy,
    barrier: &Barrier,
    queues: &[TaskQueue<'a>],
    fill: T,
) {
    let segment_size = plan.segment_size;
    let block = plan.block(me);

    for segment_id in block.clone() {
        queues[me].push(Box::new(move || {
            // SAFETY: local sort touches only the owner's block, and the
            // queue hands each task to exactly one executor.
            unsafe { shared.segment_mut(segment_id, segment_size) }.sort_unstable();
        }));
    }
    drain(queues, me);
    barrier.wait(num_threads, || steal_round(queues, me, num_threads, policy));

    let mut k = 2;
    while k <= plan.num_segments {
        let mut j = k >> 1;
        while j > 0 {
            // First wait: acquire merges of ours that peers stole and
            // finished during the previous stage.
            barrier.wait(num_threads, || steal_round(queues, me, num_threads, policy));

            for i in block.clone() {
                let ij = i ^ j;
                if i < ij {
                    let up = i & k == 0;
                    queues[me].push(Box::new(move || {
                        // TODO(buffer): pass a per-worker scratch through the
                        // task instead of allocating one per merge.
                        let mut buf = vec![fill; 2 * segment_size];
                        // SAFETY: stage pairs are disjoint, the surrounding
                        // barriers separate stages, and each task runs once.
                        let seg1 = unsafe { shared.segment_mut(i, segment_size) };
                        let seg2 = unsafe { shared.segment_mut(ij, segment_size) };
                        if up {
                            merge::merge_up(seg1, seg2, &mut buf);
                        } else {
                            merge::merge_dn(seg1, seg2, &mut buf);
                        }
                    }));
                }
            }
            drain(queues, me);

            // Second wait: publish this stage's queue contents (and any
            // stolen results) before any peer starts the next stage.
            barrier.wait(num_threads, || steal_round(queues, me, num_threads, policy));
            j >>= 1;
        }
        k <<= 1;
    }
}

/// Guarded steal round: drain peer queues only while strictly ahead of them
fn steal_guarded(
    queues: &[TaskQueue<'_>],
    thread_stage: &[AtomicUsize],
    me: usize,
    my_stage: usize,
    num_threads: usize,
) {
    for peer in me + 1..me + num_threads {
        let peer = peer % num_threads;
        if my_stage > thread_stage[peer].load(Ordering::Relaxed) {
            drain(queues, peer);
        }
    }
}

/// Wait-free stealing sort: no barrier, stage counters gate everything
pub fn sort_waitfree<T: Ord + Copy + Send + Sync>(
    data: &mut [T],
    num_threads: usize,
    segment_size: usize,
) {
    let plan = BlockPlan::new(data.len(), segment_size, num_threads);
    let fill = data[0];
    let shared = SharedSlice::new(data);
    let segment_stage: Vec<AtomicUsize> =
        (0..plan.num_segments).map(|_| AtomicUsize::new(0)).collect();
    let thread_stage: Vec<AtomicUsize> =
        (0..num_threads).map(|_| AtomicUsize::new(0)).collect();
    let queues: Vec<TaskQueue<'_>> = (0..num_threads)
        .map(|_| TaskQueue::new(QueueKind::Blocking))
        .collect();

    thread::scope(|s| {
        for worker in 1..num_threads {
            let plan = &plan;
            let segment_stage = &segment_stage[..];
            let thread_stage = &thread_stage[..];
            let queues = &queues[..];
            s.spawn(move || {
                waitfree_worker(
                    shared,
                    worker,
                    plan,
                    num_threads,
                    segment_stage,
                    thread_stage,
                    queues,
                    fill,
                )
            });
        }
        waitfree_worker(
            shared,
            0,
            &plan,
            num_threads,
            &segment_stage,
            &thread_stage,
            &queues,
            fill,
        );
    });
}

#[allow(clippy::too_many_arguments)]
fn waitfree_worker<'a, T: Ord + Copy + Send + 'a>(
    shared: SharedSlice<'a, T>,
    me: usize,
    plan: &BlockPlan,
    num_threads: usize,
    segment_stage: &'a [AtomicUsize],
    thread_stage: &[AtomicUsize],
    queues: &[TaskQueue<'a>],
    fill: T,
) {
    let segment_size = plan.segment_size;
    let block = plan.block(me);
    let mut my_stage = 0_usize;

    for segment_id in block.clone() {
        queues[me].push(Box::new(move || {
            // SAFETY: local sort touches only the owner's block, and the
            // queue hands each task to exactly one executor.
            unsafe { shared.segment_mut(segment_id, segment_size) }.sort_unstable();
            segment_stage[segment_id].fetch_add(1, Ordering::Release);
        }));
    }
    drain(queues, me);
    steal_guarded(queues, thread_stage, me, my_stage, num_threads);

    my_stage += 1;
    thread_stage[me].fetch_add(1, Ordering::Relaxed);

    let mut k = 2;
    while k <= plan.num_segments {
        let mut j = k >> 1;
        while j > 0 {
            for i in block.clone() {
                let ij = i ^ j;
                if i < ij {
                    // Wait until both segments reach this stage, stealing
                    // from slower peers instead of burning the wait.
                    while segment_stage[i].load(Ordering::Acquire) != my_stage {
                        steal_guarded(queues, thread_stage, me, my_stage, num_threads);
                    }
                    while segment_stage[ij].load(Ordering::Acquire) != my_stage {
                        steal_guarded(queues, thread_stage, me, my_stage, num_threads);
                    }

                    let up = i & k == 0;
                    queues[me].push(Box::new(move || {
                        // Pair with the Release increments below: a stolen
                        // task must observe the producing merge's writes.
                        fence(Ordering::Acquire);
                        // TODO(buffer): pass a per-worker scratch through the
                        // task instead of allocating one per merge.
                        let mut buf = vec![fill; 2 * segment_size];
                        // SAFETY: both counters matched `my_stage` above and
                        // only this one task advances them, so it holds the
                        // pair exclusively until the increments below.
                        let seg1 = unsafe { shared.segment_mut(i, segment_size) };
                        let seg2 = unsafe { shared.segment_mut(ij, segment_size) };
                        if up {
                            merge::merge_up(seg1, seg2, &mut buf);
                        } else {
                            merge::merge_dn(seg1, seg2, &mut buf);
                        }
                        segment_stage[i].fetch_add(1, Ordering::Release);
                        segment_stage[ij].fetch_add(1, Ordering::Release);
                    }));
                }
            }
            drain(queues, me);
            steal_guarded(queues, thread_stage, me, my_stage, num_threads);

            my_stage += 1;
            thread_stage[me].fetch_add(1, Ordering::Relaxed);
            j >>= 1;
        }
        k <<= 1;
    }
}
