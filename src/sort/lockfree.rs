/*!
 * Lock-Free Mode
 *
 * No barrier at all. The bitonic network's memory accesses are regular
 * enough that a global rendezvous is overkill: before merging a pair, a
 * worker only needs those two segments to have finished the previous
 * stage. One atomic counter per segment records how many stages that
 * segment has completed; a worker spins until both counters reach its own
 * private stage number, merges, then bumps both counters.
 *
 * Every counter increment happens after the producing merge's writes
 * (release), and every waiting load is an acquire, so observing
 * `count == my_stage` proves the segment's bytes from stage
 * `my_stage - 1` are visible. Threads synchronize pairwise and never wait
 * on unrelated peers.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::sync::WaitPolicy;

use super::{merge, BlockPlan, SharedSlice};

/// Lock-free sort coordinated by per-segment stage counters
pub fn sort<T: Ord + Copy + Send + Sync>(
    data: &mut [T],
    num_threads: usize,
    segment_size: usize,
    policy: WaitPolicy,
) {
    let plan = BlockPlan::new(data.len(), segment_size, num_threads);
    let fill = data[0];
    let shared = SharedSlice::new(data);
    let stage_counts: Vec<AtomicUsize> =
        (0..plan.num_segments).map(|_| AtomicUsize::new(0)).collect();

    thread::scope(|s| {
        for worker in 1..num_threads {
            let plan = &plan;
            let stage_counts = &stage_counts[..];
            s.spawn(move || worker_loop(shared, worker, plan, policy, stage_counts, fill));
        }
        worker_loop(shared, 0, &plan, policy, &stage_counts, fill);
    });
}

fn worker_loop<T: Ord + Copy>(
    shared: SharedSlice<'_, T>,
    worker: usize,
    plan: &BlockPlan,
    policy: WaitPolicy,
    stage_counts: &[AtomicUsize],
    fill: T,
) {
    let mut buf = vec![fill; 2 * plan.segment_size];
    let block = plan.block(worker);
    let mut my_stage = 0_usize;

    for segment_id in block.clone() {
        // SAFETY: this worker statically owns its block during local sort.
        unsafe { shared.segment_mut(segment_id, plan.segment_size) }.sort_unstable();
        // Publish the sorted segment for stage 1 readers.
        stage_counts[segment_id].fetch_add(1, Ordering::Release);
    }
    my_stage += 1;

    let mut k = 2;
    while k <= plan.num_segments {
        let mut j = k >> 1;
        while j > 0 {
            for i in block.clone() {
                let ij = i ^ j;
                if i < ij {
                    // Wait until both segments have caught up to this stage.
                    while stage_counts[i].load(Ordering::Acquire) != my_stage {
                        policy.relax();
                    }
                    while stage_counts[ij].load(Ordering::Acquire) != my_stage {
                        policy.relax();
                    }

                    // SAFETY: both counters equal `my_stage`, so every other
                    // worker is done with these segments for this stage and
                    // none will touch them again until the counters advance.
                    let seg1 = unsafe { shared.segment_mut(i, plan.segment_size) };
                    let seg2 = unsafe { shared.segment_mut(ij, plan.segment_size) };
                    if i & k == 0 {
                        merge::merge_up(seg1, seg2, &mut buf);
                    } else {
                        merge::merge_dn(seg1, seg2, &mut buf);
                    }

                    stage_counts[i].fetch_add(1, Ordering::Release);
                    stage_counts[ij].fetch_add(1, Ordering::Release);
                }
            }
            my_stage += 1;
            j >>= 1;
        }
        k <<= 1;
    }
}
