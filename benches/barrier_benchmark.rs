/*!
 * Barrier Benchmarks
 *
 * Rendezvous cost per variant and wait policy: four threads run a burst of
 * phases on one shared instance, so the figure includes arrival, spin, and
 * release traffic.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lockstep::{Barrier, BarrierKind, WaitPolicy};
use std::thread;

const NUM_THREADS: usize = 4;
const PHASES: usize = 100;

fn bench_rendezvous(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendezvous");

    for kind in [BarrierKind::Sense, BarrierKind::Step] {
        for policy in [WaitPolicy::Burn, WaitPolicy::Yield, WaitPolicy::Pause] {
            group.bench_with_input(
                BenchmarkId::new(kind.as_str(), policy.as_str()),
                &(kind, policy),
                |b, &(kind, policy)| {
                    b.iter(|| {
                        let barrier = Barrier::new(kind);
                        thread::scope(|s| {
                            for _ in 1..NUM_THREADS {
                                s.spawn(|| {
                                    for _ in 0..PHASES {
                                        barrier.wait_with(NUM_THREADS, policy);
                                    }
                                });
                            }
                            for _ in 0..PHASES {
                                barrier.wait_with(NUM_THREADS, policy);
                            }
                        });
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_uncontended_wait(c: &mut Criterion) {
    c.bench_function("wait_single_participant", |b| {
        let barrier = Barrier::new(BarrierKind::Sense);
        b.iter(|| black_box(&barrier).wait_with(1, WaitPolicy::Burn));
    });
}

criterion_group!(benches, bench_rendezvous, bench_uncontended_wait);
criterion_main!(benches);
