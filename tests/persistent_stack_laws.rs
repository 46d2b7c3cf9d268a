//! Property-based tests for PersistentStack.

use pfds::persistent::PersistentStack;
use proptest::prelude::*;

fn persistent_stack_strategy(max_size: usize) -> impl Strategy<Value = PersistentStack<i32>> {
    prop::collection::vec(any::<i32>(), 0..max_size).prop_map(|vector| vector.into_iter().collect())
}

fn small_stack() -> impl Strategy<Value = PersistentStack<i32>> {
    persistent_stack_strategy(20)
}

proptest! {
    #[test]
    fn prop_len_matches_iter_count(stack in small_stack()) {
        prop_assert_eq!(stack.len(), stack.iter().count());
    }

    #[test]
    fn prop_is_empty_matches_len_zero(stack in small_stack()) {
        prop_assert_eq!(stack.is_empty(), stack.len() == 0);
    }

    #[test]
    fn prop_push_then_pop_returns_original(stack in small_stack(), element: i32) {
        let pushed = stack.push(element);
        let (top, rest) = pushed.pop().unwrap();
        prop_assert_eq!(*top, element);
        prop_assert!(rest.ptr_eq(&stack));
    }

    #[test]
    fn prop_pop_order_is_reverse_push_order(elements in prop::collection::vec(any::<i32>(), 0..100)) {
        let mut stack: PersistentStack<i32> = elements.iter().copied().collect();
        let mut popped = Vec::new();
        loop {
            let (Some(element), rest) = stack.try_pop() else {
                break;
            };
            popped.push(*element);
            stack = rest;
        }
        popped.reverse();
        prop_assert_eq!(popped, elements);
        prop_assert!(stack.ptr_eq(&PersistentStack::new()));
    }

    #[test]
    fn prop_contains_matches_vec(elements in prop::collection::vec(-10i32..10, 0..30), probe in -10i32..10) {
        let stack: PersistentStack<i32> = elements.iter().copied().collect();
        prop_assert_eq!(stack.contains(&probe), elements.contains(&probe));
    }

    #[test]
    fn prop_branches_do_not_interfere(stack in small_stack(), left: i32, right: i32) {
        let left_stack = stack.push(left);
        let right_stack = stack.push(right);
        prop_assert_eq!(left_stack.peek(), Ok(&left));
        prop_assert_eq!(right_stack.peek(), Ok(&right));
        prop_assert_eq!(left_stack.iter().skip(1).collect::<Vec<_>>(), stack.iter().collect::<Vec<_>>());
        prop_assert_eq!(right_stack.iter().skip(1).collect::<Vec<_>>(), stack.iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_round_trip_through_vec(stack in small_stack()) {
        let rebuilt: PersistentStack<i32> = stack.to_vec().into_iter().rev().collect();
        prop_assert_eq!(rebuilt.to_vec(), stack.to_vec());
    }
}
