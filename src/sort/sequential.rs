/*!
 * Sequential Mode
 *
 * One thread sorts every segment, then runs the whole merging network with
 * a single scratch buffer. No shared state. Also home to the element-wise
 * compare-exchange network, kept as a readable reference implementation
 * and as the oracle the tests compare the segmented engine against.
 */

use super::merge;

/// Disjoint mutable views of segments `i` and `ij`, with `i < ij`.
#[inline]
fn pair_mut<T>(data: &mut [T], i: usize, ij: usize, segment_size: usize) -> (&mut [T], &mut [T]) {
    let (head, tail) = data.split_at_mut(ij * segment_size);
    (
        &mut head[i * segment_size..(i + 1) * segment_size],
        &mut tail[..segment_size],
    )
}

/// Segmented bitonic sort on the calling thread
pub fn sort<T: Ord + Copy>(data: &mut [T], segment_size: usize) {
    let num_segments = data.len() / segment_size;
    let mut buf = vec![data[0]; 2 * segment_size];

    for segment in data.chunks_exact_mut(segment_size) {
        segment.sort_unstable();
    }

    let mut k = 2;
    while k <= num_segments {
        let mut j = k >> 1;
        while j > 0 {
            for i in 0..num_segments {
                let ij = i ^ j;
                if i < ij {
                    let (seg1, seg2) = pair_mut(data, i, ij, segment_size);
                    if i & k == 0 {
                        merge::merge_up(seg1, seg2, &mut buf);
                    } else {
                        merge::merge_dn(seg1, seg2, &mut buf);
                    }
                }
            }
            j >>= 1;
        }
        k <<= 1;
    }
}

/// The classic element-wise bitonic network: one compare-exchange per pair.
///
/// Quadratic-ish in practice (`O(n log^2 n)` comparisons, no locality), so
/// the segmented engine above is what the parallel modes build on; this
/// stays as the reference shape of the dependency network.
pub fn compare_exchange<T: Ord>(data: &mut [T]) {
    let n = data.len();
    debug_assert!(n.is_power_of_two());
    let mut k = 2;
    while k <= n {
        let mut j = k >> 1;
        while j > 0 {
            for i in 0..n {
                let ij = i ^ j;
                if i < ij {
                    let ascending = i & k == 0;
                    if (ascending && data[i] > data[ij]) || (!ascending && data[i] < data[ij]) {
                        data.swap(i, ij);
                    }
                }
            }
            j >>= 1;
        }
        k <<= 1;
    }
}
