/*!
 * Barrier Mode
 *
 * Each worker owns a fixed block of segments. After its local sorts, and
 * again after every (k, j) stage, it waits at a shared reusable barrier;
 * the barrier's release/acquire pairing is what makes one stage's writes
 * visible to the next stage's readers. The calling thread participates as
 * worker 0, so only `num_threads - 1` threads are spawned.
 */

use std::thread;

use crate::sync::{Barrier, BarrierKind, WaitPolicy};

use super::{merge, BlockPlan, SharedSlice};

/// Barrier-synchronized sort with the default (sense) barrier
pub fn sort<T: Ord + Copy + Send + Sync>(
    data: &mut [T],
    num_threads: usize,
    segment_size: usize,
    policy: WaitPolicy,
) {
    sort_with(BarrierKind::Sense, data, num_threads, segment_size, policy);
}

/// Barrier-synchronized sort with an explicit barrier variant
pub fn sort_with<T: Ord + Copy + Send + Sync>(
    kind: BarrierKind,
    data: &mut [T],
    num_threads: usize,
    segment_size: usize,
    policy: WaitPolicy,
) {
    let plan = BlockPlan::new(data.len(), segment_size, num_threads);
    let fill = data[0];
    let shared = SharedSlice::new(data);
    let barrier = Barrier::new(kind);

    thread::scope(|s| {
        for worker in 1..num_threads {
            let plan = &plan;
            let barrier = &barrier;
            s.spawn(move || worker_loop(shared, worker, plan, num_threads, policy, barrier, fill));
        }
        worker_loop(shared, 0, &plan, num_threads, policy, &barrier, fill);
    });
}

fn worker_loop<T: Ord + Copy>(
    shared: SharedSlice<'_, T>,
    worker: usize,
    plan: &BlockPlan,
    num_threads: usize,
    policy: WaitPolicy,
    barrier: &Barrier,
    fill: T,
) {
    let mut buf = vec![fill; 2 * plan.segment_size];
    let block = plan.block(worker);

    for segment_id in block.clone() {
        // SAFETY: this worker statically owns its block during local sort.
        unsafe { shared.segment_mut(segment_id, plan.segment_size) }.sort_unstable();
    }
    barrier.wait(num_threads, || policy.relax());

    let mut k = 2;
    while k <= plan.num_segments {
        let mut j = k >> 1;
        while j > 0 {
            for i in block.clone() {
                let ij = i ^ j;
                if i < ij {
                    // SAFETY: pairs within a stage are disjoint and the
                    // barrier separates stages, so both views are exclusive.
                    let seg1 = unsafe { shared.segment_mut(i, plan.segment_size) };
                    let seg2 = unsafe { shared.segment_mut(ij, plan.segment_size) };
                    if i & k == 0 {
                        merge::merge_up(seg1, seg2, &mut buf);
                    } else {
                        merge::merge_dn(seg1, seg2, &mut buf);
                    }
                }
            }
            barrier.wait(num_threads, || policy.relax());
            j >>= 1;
        }
        k <<= 1;
    }
}
