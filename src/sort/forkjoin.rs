/*!
 * Fork-Join Mode
 *
 * The outer (k, j) loops stay sequential; the merges inside one stage fan
 * out on a rayon pool and the pool's join at the end of each `for_each` is
 * the stage barrier. Scratch buffers come from `for_each_init`, one per
 * rayon task splice.
 */

use log::warn;
use rayon::prelude::*;

use super::{merge, SharedSlice};

/// Segmented bitonic sort on a rayon pool of `num_threads` workers
pub fn sort<T: Ord + Copy + Send + Sync>(data: &mut [T], num_threads: usize, segment_size: usize) {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
    {
        Ok(pool) => pool.install(|| run(data, segment_size)),
        Err(err) => {
            warn!("fork-join pool construction failed ({err}); running on the global pool");
            run(data, segment_size);
        }
    }
}

fn run<T: Ord + Copy + Send + Sync>(data: &mut [T], segment_size: usize) {
    let num_segments = data.len() / segment_size;
    let fill = data[0];

    data.par_chunks_exact_mut(segment_size)
        .for_each(|segment| segment.sort_unstable());

    let shared = SharedSlice::new(data);
    let mut k = 2;
    while k <= num_segments {
        let mut j = k >> 1;
        while j > 0 {
            let pairs: Vec<(usize, usize)> = (0..num_segments)
                .filter_map(|i| {
                    let ij = i ^ j;
                    (i < ij).then_some((i, ij))
                })
                .collect();
            pairs.par_iter().for_each_init(
                || vec![fill; 2 * segment_size],
                |buf, &(i, ij)| {
                    // SAFETY: within one (k, j) stage the pairs partition
                    // the segments, so these two views are exclusive.
                    let seg1 = unsafe { shared.segment_mut(i, segment_size) };
                    let seg2 = unsafe { shared.segment_mut(ij, segment_size) };
                    if i & k == 0 {
                        merge::merge_up(seg1, seg2, buf);
                    } else {
                        merge::merge_dn(seg1, seg2, buf);
                    }
                },
            );
            j >>= 1;
        }
        k <<= 1;
    }
}
