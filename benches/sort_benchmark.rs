/*!
 * Sort Benchmarks
 *
 * The same shuffled input through every coordination mode. The interesting
 * comparison is barrier vs lock-free vs stealing on the identical network;
 * sequential anchors the parallel speedup.
 */

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use lockstep::{sort, SortMode, WaitPolicy};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const LEN: usize = 1 << 16;
const SEGMENT_SIZE: usize = 512;
const NUM_THREADS: usize = 4;

fn shuffled_input() -> Vec<u64> {
    let mut data: Vec<u64> = (0..LEN as u64).collect();
    data.shuffle(&mut ChaCha8Rng::seed_from_u64(42));
    data
}

fn bench_modes(c: &mut Criterion) {
    let input = shuffled_input();
    let mut group = c.benchmark_group("bitonic_sort");
    group.throughput(Throughput::Elements(LEN as u64));

    for mode in SortMode::all() {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            b.iter_batched_ref(
                || input.clone(),
                |data| sort(data, mode, NUM_THREADS, SEGMENT_SIZE, WaitPolicy::Yield),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_segment_sizes(c: &mut Criterion) {
    let input = shuffled_input();
    let mut group = c.benchmark_group("segment_size");

    for segment_size in [64, 256, 1024, 4096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(segment_size),
            &segment_size,
            |b, &segment_size| {
                b.iter_batched_ref(
                    || input.clone(),
                    |data| {
                        sort(
                            data,
                            SortMode::LockFree,
                            NUM_THREADS,
                            segment_size,
                            WaitPolicy::Yield,
                        )
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_modes, bench_segment_sizes);
criterion_main!(benches);
