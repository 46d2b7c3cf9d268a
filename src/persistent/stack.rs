//! Persistent (immutable) LIFO stack.
//!
//! This module provides [`PersistentStack`], an immutable singly-linked stack
//! in which every operation returns a new version and leaves the receiver
//! untouched.
//!
//! # Overview
//!
//! `PersistentStack` provides:
//!
//! - O(1) `push`, `pop` and `peek`
//! - O(1) `len` (each node caches the size of the stack it tops)
//! - O(n) `contains` and iteration, top to bottom
//!
//! # Structural Sharing
//!
//! Pushing allocates exactly one node that points at the version it was
//! pushed onto. Any number of versions can share the same tail:
//!
//! ```text
//! base:    1 -> nil
//! left  = base.push(2): 2 -> [1 -> nil]   // shares [1] with base
//! right = base.push(3): 3 -> [1 -> nil]   // shares [1] with base and left
//! ```
//!
//! All empty stacks are the same value: popping the last element of any
//! version yields a stack that is [`ptr_eq`](PersistentStack::ptr_eq) to
//! [`PersistentStack::new`].
//!
//! # Examples
//!
//! ```rust
//! use pfds::persistent::PersistentStack;
//!
//! let stack = PersistentStack::new().push(1).push(2).push(3);
//! assert_eq!(stack.peek(), Ok(&3));
//!
//! let (top, rest) = stack.pop().unwrap();
//! assert_eq!(*top, 3);
//! assert_eq!(rest.len(), 2);
//! assert_eq!(stack.len(), 3); // Original unchanged
//!
//! // Building from an iterator leaves the last element on top
//! let stack: PersistentStack<i32> = (1..=3).collect();
//! assert_eq!(stack.to_vec(), vec![3, 2, 1]);
//! ```

use std::fmt;
use std::iter::FromIterator;

use super::ReferenceCounter;
use super::error::EmptyCollectionError;

const COLLECTION_NAME: &str = "PersistentStack";

/// A single immutable cell of a stack.
struct Node<T> {
    element: T,
    below: Option<ReferenceCounter<Self>>,
    /// Number of elements in the stack whose top is this node.
    count: usize,
}

/// A persistent (immutable) LIFO stack.
///
/// Cloning a `PersistentStack` copies a single pointer; the nodes are shared.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `new`      | O(1)       |
/// | `push`     | O(1)       |
/// | `pop`      | O(1)       |
/// | `peek`     | O(1)       |
/// | `len`      | O(1)       |
/// | `contains` | O(n)       |
/// | `to_vec`   | O(n)       |
///
/// # Examples
///
/// ```rust
/// use pfds::persistent::PersistentStack;
///
/// let base = PersistentStack::singleton(1);
/// let left = base.push(2);
/// let right = base.push(3);
///
/// assert_eq!(left.to_vec(), vec![2, 1]);
/// assert_eq!(right.to_vec(), vec![3, 1]);
/// assert_eq!(base.to_vec(), vec![1]);
/// ```
pub struct PersistentStack<T> {
    top: Option<ReferenceCounter<Node<T>>>,
}

impl<T> PersistentStack<T> {
    /// Creates the empty stack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentStack;
    ///
    /// let stack: PersistentStack<i32> = PersistentStack::new();
    /// assert!(stack.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { top: None }
    }

    /// Creates a stack holding a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().push(element)
    }

    /// Returns a new version with `element` on top.
    ///
    /// Allocates exactly one node; the receiver becomes the new version's
    /// predecessor and is not modified.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentStack;
    ///
    /// let stack = PersistentStack::new().push(1);
    /// let pushed = stack.push(2);
    /// assert_eq!(stack.len(), 1);
    /// assert_eq!(pushed.peek(), Ok(&2));
    /// ```
    #[inline]
    #[must_use]
    pub fn push(&self, element: T) -> Self {
        let count = self.len() + 1;
        Self {
            top: Some(ReferenceCounter::new(Node {
                element,
                below: self.top.clone(),
                count,
            })),
        }
    }

    /// Returns the top element together with the version below it.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the stack is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentStack;
    ///
    /// let stack = PersistentStack::new().push(1).push(2);
    /// let (top, rest) = stack.pop().unwrap();
    /// assert_eq!(*top, 2);
    /// assert_eq!(rest.peek(), Ok(&1));
    ///
    /// assert!(PersistentStack::<i32>::new().pop().is_err());
    /// ```
    pub fn pop(&self) -> Result<(&T, Self), EmptyCollectionError> {
        self.uncons()
            .ok_or(EmptyCollectionError::new(COLLECTION_NAME, "pop"))
    }

    /// Like [`pop`](Self::pop), but reports an empty stack with `None`.
    ///
    /// The returned version is the one below the popped element, or the
    /// receiver itself when the stack is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentStack;
    ///
    /// let empty: PersistentStack<i32> = PersistentStack::new();
    /// let (element, same) = empty.try_pop();
    /// assert_eq!(element, None);
    /// assert!(same.ptr_eq(&empty));
    /// ```
    #[must_use]
    pub fn try_pop(&self) -> (Option<&T>, Self) {
        match self.uncons() {
            Some((element, rest)) => (Some(element), rest),
            None => (None, self.clone()),
        }
    }

    /// Returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the stack is empty.
    pub fn peek(&self) -> Result<&T, EmptyCollectionError> {
        self.try_peek()
            .ok_or(EmptyCollectionError::new(COLLECTION_NAME, "peek"))
    }

    /// Returns the top element, or `None` if the stack is empty.
    #[inline]
    #[must_use]
    pub fn try_peek(&self) -> Option<&T> {
        self.top.as_ref().map(|node| &node.element)
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// O(1) - read from the top node
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.top.as_ref().map_or(0, |node| node.count)
    }

    /// Returns `true` if the stack holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Returns `true` if both stacks are the very same version.
    ///
    /// This is identity, not value equality: two stacks built separately from
    /// equal elements are not `ptr_eq`. Every empty stack is `ptr_eq` to
    /// every other empty stack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentStack;
    ///
    /// let stack = PersistentStack::singleton(1);
    /// assert!(stack.ptr_eq(&stack.clone()));
    /// assert!(!stack.ptr_eq(&PersistentStack::singleton(1)));
    ///
    /// let (_, emptied) = stack.pop().unwrap();
    /// assert!(emptied.ptr_eq(&PersistentStack::new()));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.top, &other.top) {
            (None, None) => true,
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns an iterator over the elements from top to bottom.
    ///
    /// The iterator starts from the (immutable) top node, so the stack can be
    /// traversed any number of times.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentStackIterator<'_, T> {
        PersistentStackIterator {
            current: self.top.as_deref(),
            remaining: self.len(),
        }
    }

    /// Returns `true` if any element equals `element`.
    ///
    /// # Complexity
    ///
    /// O(n), scanning from the top
    #[must_use]
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|candidate| candidate == element)
    }

    fn uncons(&self) -> Option<(&T, Self)> {
        self.top.as_ref().map(|node| {
            let below = Self {
                top: node.below.clone(),
            };
            (&node.element, below)
        })
    }
}

impl<T: Clone> PersistentStack<T> {
    /// Copies the elements into a `Vec`, top first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentStack;
    ///
    /// let stack = PersistentStack::new().push(1).push(2).push(3);
    /// assert_eq!(stack.to_vec(), vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to the elements of a [`PersistentStack`],
/// from top to bottom.
pub struct PersistentStackIterator<'a, T> {
    current: Option<&'a Node<T>>,
    remaining: usize,
}

impl<T> Clone for PersistentStackIterator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for PersistentStackIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.below.as_deref();
            self.remaining -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentStackIterator<'_, T> {}

impl<T> std::iter::FusedIterator for PersistentStackIterator<'_, T> {}

/// An owning iterator over the elements of a [`PersistentStack`], from top to
/// bottom.
///
/// Elements are cloned out of the shared nodes.
pub struct PersistentStackIntoIterator<T> {
    stack: PersistentStack<T>,
}

impl<T: Clone> Iterator for PersistentStackIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (element, below) = self.stack.uncons()?;
        let element = element.clone();
        self.stack = below;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.stack.len()))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentStackIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentStack<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            top: self.top.clone(),
        }
    }
}

impl<T> Default for PersistentStack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// Unlinks uniquely-owned nodes one at a time; the derived recursive drop
// would overflow the call stack on long chains.
impl<T> Drop for PersistentStack<T> {
    fn drop(&mut self) {
        let mut current = self.top.take();
        while let Some(node) = current {
            match ReferenceCounter::try_unwrap(node) {
                Ok(mut node) => current = node.below.take(),
                Err(_) => break,
            }
        }
    }
}

/// Pushes the elements in iteration order: the last element ends on top.
impl<T> FromIterator<T> for PersistentStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |stack, element| stack.push(element))
    }
}

impl<T: Clone> IntoIterator for PersistentStack<T> {
    type Item = T;
    type IntoIter = PersistentStackIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentStackIntoIterator { stack: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentStack<T> {
    type Item = &'a T;
    type IntoIter = PersistentStackIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentStack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentStack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentStack<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentStackVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentStackVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = PersistentStack<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence ordered from top to bottom")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        // The sequence lists the top first, so the bottom is pushed first.
        Ok(elements.into_iter().rev().collect())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentStack<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentStackVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
