//! Persistent (immutable, versioned) collections.
//!
//! This module provides two collections whose operations never modify the
//! receiver. Each operation returns a new version, and every version that was
//! ever returned stays valid:
//!
//! - [`PersistentStack`]: LIFO stack built from shared immutable nodes
//! - [`PersistentQueue`]: real-time FIFO queue built from five stacks
//!
//! # Structural Sharing
//!
//! Versions share their nodes instead of copying them. Two versions derived
//! from a common ancestor share everything the ancestor held and can be
//! extended independently without observing each other's elements.
//!
//! # Examples
//!
//! ## `PersistentStack`
//!
//! ```rust
//! use pfds::persistent::PersistentStack;
//!
//! let stack = PersistentStack::new().push(1).push(2);
//! let (top, rest) = stack.pop().unwrap();
//! assert_eq!(*top, 2);
//! assert_eq!(rest.len(), 1);
//! assert_eq!(stack.len(), 2); // Original unchanged
//! ```
//!
//! ## `PersistentQueue`
//!
//! ```rust
//! use pfds::persistent::PersistentQueue;
//!
//! let queue = PersistentQueue::new().enqueue(1).enqueue(2).enqueue(3);
//! let (front, rest) = queue.dequeue().unwrap();
//! assert_eq!(*front, 1);
//!
//! // Branching: both versions stay usable
//! let left = rest.enqueue(4);
//! let right = queue.enqueue(5);
//! assert_eq!(left.to_vec(), vec![2, 3, 4]);
//! assert_eq!(right.to_vec(), vec![1, 2, 3, 5]);
//! ```
//!
//! ## Empty collections
//!
//! ```rust
//! use pfds::persistent::{EmptyCollectionError, PersistentQueue};
//!
//! let queue: PersistentQueue<i32> = PersistentQueue::new();
//! assert!(matches!(queue.dequeue(), Err(EmptyCollectionError { .. })));
//! assert_eq!(queue.try_peek(), None);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, and every
/// version of every collection can be shared across threads.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod queue;
mod stack;

pub use error::EmptyCollectionError;
pub use queue::PersistentQueue;
pub use queue::PersistentQueueIntoIterator;
pub use queue::PersistentQueueIterator;
pub use stack::PersistentStack;
pub use stack::PersistentStackIntoIterator;
pub use stack::PersistentStackIterator;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentStack<i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentQueue<String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentStack<i32>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentQueue<i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
