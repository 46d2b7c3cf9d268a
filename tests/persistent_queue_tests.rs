//! Unit tests for PersistentQueue.
//!
//! These tests exercise the public surface of the queue: construction,
//! enqueue/dequeue/peek and their `try_` variants, membership, front-to-back
//! iteration, and branching from shared versions.

use pfds::persistent::{EmptyCollectionError, PersistentQueue};
use rstest::rstest;
use std::collections::VecDeque;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_queue() {
    let queue: PersistentQueue<i32> = PersistentQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.try_peek(), None);
    assert!(queue.iter().next().is_none());
}

#[rstest]
fn test_from_iter_enqueues_in_order() {
    let queue: PersistentQueue<i32> = vec![1, 2, 3].into_iter().collect();
    assert_eq!(queue.peek(), Ok(&1));
    assert_eq!(queue.to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_singleton() {
    let queue = PersistentQueue::singleton(42);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.peek(), Ok(&42));
}

// =============================================================================
// Basic Operations
// =============================================================================

#[rstest]
fn test_basic_operations() {
    let mut queue = PersistentQueue::new();
    assert_eq!(queue.len(), 0);
    for element in 1..=5 {
        queue = queue.enqueue(element);
        assert_eq!(queue.to_vec(), (1..=element).collect::<Vec<_>>());
    }
    assert!(queue.contains(&2));
    assert!(queue.contains(&4));
    assert!(!queue.contains(&6));
    assert_eq!(queue.peek(), Ok(&1));
    assert_eq!(queue.len(), 5);
    assert_eq!(queue.try_peek(), Some(&1));

    let (element, queue) = queue.try_dequeue();
    assert_eq!(element, Some(&1));
    assert_eq!(queue.peek(), Ok(&2));
    assert_eq!(queue.len(), 4);

    let (_, queue) = queue.dequeue().unwrap();
    let (_, queue) = queue.dequeue().unwrap();
    let (_, queue) = queue.dequeue().unwrap();
    let (last, queue) = queue.dequeue().unwrap();
    assert_eq!(*last, 5);
    assert_eq!(queue.len(), 0);

    assert!(queue.dequeue().is_err());
    assert!(queue.peek().is_err());
    assert_eq!(queue.try_peek(), None);
    let (element, same) = queue.try_dequeue();
    assert_eq!(element, None);
    assert!(same.ptr_eq(&queue));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
#[case(100)]
#[case(1000)]
fn test_dequeue_order_is_fifo(#[case] size: i32) {
    let mut queue = PersistentQueue::new();
    for element in 0..size {
        queue = queue.enqueue(element);
    }
    let mut dequeued = Vec::new();
    loop {
        let Ok((element, rest)) = queue.dequeue() else {
            break;
        };
        dequeued.push(*element);
        queue = rest;
    }
    assert_eq!(dequeued, (0..size).collect::<Vec<_>>());
    assert!(queue.is_empty());
}

#[rstest]
fn test_enqueue_does_not_modify_original() {
    let queue: PersistentQueue<i32> = (1..=3).collect();
    let extended = queue.enqueue(4);
    assert_eq!(queue.to_vec(), vec![1, 2, 3]);
    assert_eq!(extended.to_vec(), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_dequeue_does_not_modify_original() {
    let queue: PersistentQueue<i32> = (1..=3).collect();
    let (_, shortened) = queue.dequeue().unwrap();
    assert_eq!(queue.to_vec(), vec![1, 2, 3]);
    assert_eq!(shortened.to_vec(), vec![2, 3]);
}

// =============================================================================
// Empty Queue
// =============================================================================

#[rstest]
fn test_dequeue_on_empty_fails() {
    let queue: PersistentQueue<i32> = PersistentQueue::new();
    assert_eq!(
        queue.dequeue().unwrap_err(),
        EmptyCollectionError {
            collection: "PersistentQueue",
            operation: "dequeue",
        }
    );
}

#[rstest]
fn test_peek_on_empty_fails() {
    let queue: PersistentQueue<i32> = PersistentQueue::new();
    assert_eq!(
        queue.peek().unwrap_err(),
        EmptyCollectionError {
            collection: "PersistentQueue",
            operation: "peek",
        }
    );
}

#[rstest]
fn test_drained_queue_can_be_refilled() {
    let queue: PersistentQueue<i32> = (1..=3).collect();
    let (_, queue) = queue.dequeue().unwrap();
    let (_, queue) = queue.dequeue().unwrap();
    let (_, queue) = queue.dequeue().unwrap();
    assert!(queue.dequeue().is_err());
    let queue = queue.enqueue(7).enqueue(8);
    assert_eq!(queue.to_vec(), vec![7, 8]);
}

// =============================================================================
// Branching
// =============================================================================

#[rstest]
fn test_branching() {
    let queue: PersistentQueue<i32> = [1, 2, 3].into_iter().collect();
    assert_eq!(queue.to_vec(), vec![1, 2, 3]);

    let left = queue.enqueue(4);
    let right = queue.enqueue(5);
    assert!(left.contains(&4));
    assert!(right.contains(&5));
    assert!(!left.contains(&5));
    assert!(!right.contains(&4));

    let mut right = right;
    for _ in 0..4 {
        let (_, rest) = right.dequeue().unwrap();
        right = rest;
    }
    assert_eq!(right.len(), 0);
    assert_eq!(left.to_vec(), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_every_historical_version_stays_valid() {
    let mut versions = vec![PersistentQueue::new()];
    let mut models = vec![VecDeque::new()];
    for step in 0..200 {
        let latest = versions.last().unwrap().clone();
        let mut model = models.last().unwrap().clone();
        let next = if step % 4 == 3 {
            let (element, rest) = latest.dequeue().unwrap();
            assert_eq!(Some(*element), model.pop_front());
            rest
        } else {
            model.push_back(step);
            latest.enqueue(step)
        };
        versions.push(next);
        models.push(model);
    }
    for (version, model) in versions.iter().zip(&models) {
        assert_eq!(version.iter().copied().collect::<VecDeque<_>>(), *model);
        assert_eq!(version.len(), model.len());
        assert_eq!(version.try_peek(), model.front());
    }
}

#[rstest]
fn test_branches_from_every_version_are_independent() {
    let mut trunk = PersistentQueue::new();
    let mut model = VecDeque::new();
    for element in 0..100 {
        trunk = trunk.enqueue(element);
        model.push_back(element);

        let branch = trunk.enqueue(-1);
        let (front, after) = branch.dequeue().unwrap();
        assert_eq!(Some(front), model.front());
        assert_eq!(after.len(), model.len());
        assert_eq!(after.iter().last(), Some(&-1));
        assert_eq!(trunk.to_vec(), Vec::from(model.clone()));
    }
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_iteration_is_front_to_back() {
    let queue: PersistentQueue<i32> = (1..=10).collect();
    let (_, queue) = queue.dequeue().unwrap();
    let queue = queue.enqueue(11);
    let collected: Vec<i32> = (&queue).into_iter().copied().collect();
    assert_eq!(collected, (2..=11).collect::<Vec<_>>());
}

#[rstest]
fn test_owned_into_iter() {
    let queue: PersistentQueue<i32> = (1..=20).collect();
    let collected: Vec<i32> = queue.clone().into_iter().collect();
    assert_eq!(collected, (1..=20).collect::<Vec<_>>());
    assert_eq!(queue.len(), 20);
}

#[rstest]
fn test_round_trip_through_vec() {
    let queue: PersistentQueue<i32> = (1..=33).collect();
    let (_, queue) = queue.dequeue().unwrap();
    let rebuilt: PersistentQueue<i32> = queue.to_vec().into_iter().collect();
    assert_eq!(rebuilt.to_vec(), queue.to_vec());
    assert_eq!(rebuilt.len(), queue.len());
}

// =============================================================================
// Formatting
// =============================================================================

#[rstest]
fn test_debug_and_display() {
    let queue = PersistentQueue::new().enqueue("a").enqueue("b");
    assert_eq!(format!("{queue:?}"), "[\"a\", \"b\"]");
    assert_eq!(format!("{queue}"), "[a, b]");
}
