//! IAI-Callgrind benchmark for PersistentQueue and PersistentStack operations.
//!
//! Measures instruction counts, which makes the worst-case behaviour of the
//! queue visible: a single `enqueue`/`dequeue` at the point where a rebuild
//! starts must cost about the same as one in the steady state.
//!
//! # Data Sizes
//!
//! - **enqueue / dequeue_all**: 1000
//! - **single operation**: 1023 (steady) and 1024 elements (rebuild in progress)

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use pfds::persistent::{PersistentQueue, PersistentStack};
use std::hint::black_box;

fn setup_queue_1000() -> PersistentQueue<i32> {
    (0..1000).collect()
}

fn setup_queue_1023() -> PersistentQueue<i32> {
    (0..1023).collect()
}

fn setup_queue_1024() -> PersistentQueue<i32> {
    (0..1024).collect()
}

#[library_benchmark]
fn enqueue_1000() -> PersistentQueue<i32> {
    let mut queue = PersistentQueue::new();
    for index in 0..1000 {
        queue = queue.enqueue(black_box(index));
    }
    black_box(queue)
}

#[library_benchmark]
#[bench::with_setup(setup_queue_1000())]
fn dequeue_all_1000(queue: PersistentQueue<i32>) -> i32 {
    let mut queue = queue;
    let mut sum = 0;
    loop {
        let (Some(element), rest) = queue.try_dequeue() else {
            break;
        };
        sum += *element;
        queue = rest;
    }
    black_box(sum)
}

#[library_benchmark]
#[bench::steady(setup_queue_1023())]
#[bench::rebuilding(setup_queue_1024())]
fn single_enqueue(queue: PersistentQueue<i32>) -> PersistentQueue<i32> {
    black_box(queue.enqueue(black_box(-1)))
}

#[library_benchmark]
#[bench::steady(setup_queue_1023())]
#[bench::rebuilding(setup_queue_1024())]
fn single_dequeue(queue: PersistentQueue<i32>) -> PersistentQueue<i32> {
    let (_, rest) = black_box(queue.dequeue().unwrap());
    rest
}

#[library_benchmark]
fn push_1000() -> PersistentStack<i32> {
    let mut stack = PersistentStack::new();
    for index in 0..1000 {
        stack = stack.push(black_box(index));
    }
    black_box(stack)
}

library_benchmark_group!(
    name = persistent_queue_group;
    benchmarks =
        enqueue_1000,
        dequeue_all_1000,
        single_enqueue,
        single_dequeue,
        push_1000
);

main!(library_benchmark_groups = persistent_queue_group);
