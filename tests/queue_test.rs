/*!
 * Task Queue Integration Tests
 *
 * FIFO ordering, non-blocking empty pops, at-most-once execution under
 * contention, and cross-thread draining (the property the stealing sort
 * leans on).
 */

use lockstep::{make_queue, QueueKind, TaskQueue};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

#[test]
fn factory_builds_known_variants_only() {
    assert!(make_queue("blocking").is_some());
    assert!(make_queue("Blocking").is_some());
    assert!(make_queue("lockfree").is_none());
    assert!(make_queue("").is_none());
    assert_eq!(QueueKind::parse("blocking"), Some(QueueKind::Blocking));
}

#[test]
fn pop_on_empty_returns_none_without_blocking() {
    let queue: TaskQueue = TaskQueue::default();
    assert!(queue.pop().is_none());
    assert!(queue.pop().is_none());
}

#[test]
fn tasks_come_out_in_push_order() {
    let order = Mutex::new(Vec::new());
    let queue = TaskQueue::new(QueueKind::Blocking);
    let order = &order;
    for i in 0..10 {
        queue.push(Box::new(move || order.lock().push(i)));
    }
    while let Some(task) = queue.pop() {
        task();
    }
    assert_eq!(*order.lock(), (0..10).collect::<Vec<_>>());
}

/// Every pushed task runs exactly once, no matter how many threads race
/// to pop it.
#[test]
fn at_most_once_under_contention() {
    const TASKS: usize = 1_000;
    const CONSUMERS: usize = 4;

    let runs: Vec<AtomicUsize> = (0..TASKS).map(|_| AtomicUsize::new(0)).collect();
    let queue = TaskQueue::new(QueueKind::Blocking);
    for slot in &runs {
        queue.push(Box::new(move || {
            slot.fetch_add(1, Ordering::Relaxed);
        }));
    }

    thread::scope(|s| {
        for _ in 0..CONSUMERS {
            s.spawn(|| {
                while let Some(task) = queue.pop() {
                    task();
                }
            });
        }
    });

    for (i, slot) in runs.iter().enumerate() {
        assert_eq!(slot.load(Ordering::Relaxed), 1, "task {i} ran a wrong number of times");
    }
}

#[test]
fn concurrent_producers_and_consumers() {
    const PER_PRODUCER: usize = 500;

    let executed = AtomicUsize::new(0);
    let done_producing = AtomicBool::new(false);
    let queue = TaskQueue::new(QueueKind::Blocking);
    let executed = &executed;

    thread::scope(|s| {
        let producers: Vec<_> = (0..2)
            .map(|_| {
                s.spawn(|| {
                    for _ in 0..PER_PRODUCER {
                        queue.push(Box::new(move || {
                            executed.fetch_add(1, Ordering::Relaxed);
                        }));
                    }
                })
            })
            .collect();

        for _ in 0..2 {
            s.spawn(|| {
                // Keep draining until producers are done and the queue is dry.
                loop {
                    match queue.pop() {
                        Some(task) => task(),
                        None if done_producing.load(Ordering::Acquire) => break,
                        None => thread::yield_now(),
                    }
                }
            });
        }

        for producer in producers {
            producer.join().unwrap();
        }
        done_producing.store(true, Ordering::Release);
    });

    assert_eq!(executed.load(Ordering::Relaxed), 2 * PER_PRODUCER);
}

/// Work pushed by one thread is executable by another: the mechanism the
/// stealing sort uses to keep waiting threads useful.
#[test]
fn peers_can_drain_a_foreign_queue() {
    const TASKS: usize = 100;

    let executed = AtomicUsize::new(0);
    let queue = TaskQueue::new(QueueKind::Blocking);
    let executed = &executed;

    // Owner enqueues and never pops.
    for _ in 0..TASKS {
        queue.push(Box::new(move || {
            executed.fetch_add(1, Ordering::Relaxed);
        }));
    }

    thread::scope(|s| {
        s.spawn(|| {
            while let Some(task) = queue.pop() {
                task();
            }
        });
    });

    assert_eq!(executed.load(Ordering::Relaxed), TASKS);
}
