//! Persistent (immutable) real-time FIFO queue.
//!
//! This module provides [`PersistentQueue`], a queue whose `enqueue`,
//! `dequeue` and `peek` run in worst-case O(1) time while every previously
//! returned version stays valid and independently usable.
//!
//! # Overview
//!
//! The queue is assembled from five [`PersistentStack`]s:
//!
//! - `front`: serves dequeues, next element on top
//! - `rear`: receives enqueues, newest element on top
//! - `front_copy`: snapshot of the old front that serves dequeues while a
//!   new front is being rebuilt
//! - `rear_copy`: receives enqueues while a rebuild is in progress
//! - `schedule`: scratch space holding the reversed old front
//!
//! In the steady state the queue reads `front` top to bottom followed by
//! `rear` bottom to top, and `front.len() >= rear.len()`. The operation that
//! breaks that balance starts a rebuild which computes
//! `new front = old front ++ reverse(old rear)` in three phases:
//!
//! 1. reverse the old front onto `schedule`
//! 2. reverse the old rear onto `front`
//! 3. pop `schedule` back onto `front`, keeping only the elements of the old
//!    front that have not been dequeued in the meantime and discarding the rest
//!
//! Every operation performs at most [`REBUILD_STEPS_PER_OPERATION`] element
//! moves of the rebuild, which finishes before the snapshot in `front_copy`
//! runs out. The rebuild progress is part of each version's value, so a
//! version captured mid-rebuild can be extended any number of times.
//!
//! # Examples
//!
//! ```rust
//! use pfds::persistent::PersistentQueue;
//!
//! let queue: PersistentQueue<i32> = (1..=3).collect();
//! let (first, rest) = queue.dequeue().unwrap();
//! assert_eq!(*first, 1);
//!
//! // Branches from the same version never observe each other
//! let left = rest.enqueue(4);
//! let right = rest.enqueue(5);
//! assert_eq!(left.to_vec(), vec![2, 3, 4]);
//! assert_eq!(right.to_vec(), vec![2, 3, 5]);
//! assert_eq!(queue.to_vec(), vec![1, 2, 3]);
//! ```
//!
//! # References
//!
//! - Hood & Melville, "Real-time queue operations in pure LISP" (1981)
//! - Okasaki, "Purely Functional Data Structures" (1998)

use std::fmt;
use std::iter::FromIterator;

use smallvec::SmallVec;

use super::error::EmptyCollectionError;
use super::stack::{PersistentStack, PersistentStackIterator};

const COLLECTION_NAME: &str = "PersistentQueue";

/// Number of element moves of an in-flight rebuild performed by each
/// operation.
pub(crate) const REBUILD_STEPS_PER_OPERATION: usize = 3;

/// Upper bound on the stack segments that make up the queue's content.
const MAX_SEGMENTS: usize = 4;

/// Progress of the incremental rebuild, carried by value in every version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rebalance {
    Steady,
    Rebuilding {
        phase: RebuildPhase,
        /// Elements of the old front that are still live and not yet moved
        /// back onto the rebuilt front.
        carry_over: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RebuildPhase {
    /// `front` -> `schedule`
    ReverseFront,
    /// `rear` -> `front`
    ReverseRear,
    /// `schedule` -> `front` while `carry_over > 0`, then discard
    Drain,
}

/// A persistent (immutable) real-time FIFO queue.
///
/// Cloning a `PersistentQueue` copies five stack handles and a few scalars.
///
/// # Time Complexity
///
/// | Operation  | Complexity           |
/// |------------|----------------------|
/// | `new`      | O(1)                 |
/// | `enqueue`  | O(1) worst case      |
/// | `dequeue`  | O(1) worst case      |
/// | `peek`     | O(1)                 |
/// | `len`      | O(1)                 |
/// | `contains` | O(n)                 |
/// | `iter`     | O(n) for a full pass |
///
/// # Examples
///
/// ```rust
/// use pfds::persistent::PersistentQueue;
///
/// let queue = PersistentQueue::new().enqueue(1).enqueue(2);
/// assert_eq!(queue.peek(), Ok(&1));
/// assert_eq!(queue.len(), 2);
/// ```
pub struct PersistentQueue<T> {
    front: PersistentStack<T>,
    front_copy: PersistentStack<T>,
    rear: PersistentStack<T>,
    rear_copy: PersistentStack<T>,
    schedule: PersistentStack<T>,
    rebalance: Rebalance,
    length: usize,
}

impl<T> PersistentQueue<T> {
    /// Creates an empty queue.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentQueue;
    ///
    /// let queue: PersistentQueue<i32> = PersistentQueue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            front: PersistentStack::new(),
            front_copy: PersistentStack::new(),
            rear: PersistentStack::new(),
            rear_copy: PersistentStack::new(),
            schedule: PersistentStack::new(),
            rebalance: Rebalance::Steady,
            length: 0,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the element at the front of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentQueue;
    ///
    /// let queue = PersistentQueue::new().enqueue('a').enqueue('b');
    /// assert_eq!(queue.peek(), Ok(&'a'));
    /// assert!(PersistentQueue::<char>::new().peek().is_err());
    /// ```
    pub fn peek(&self) -> Result<&T, EmptyCollectionError> {
        self.try_peek()
            .ok_or(EmptyCollectionError::new(COLLECTION_NAME, "peek"))
    }

    /// Returns the element at the front, or `None` if the queue is empty.
    #[must_use]
    pub fn try_peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.serving_stack().try_peek()
    }

    /// Returns `true` if both queues are the very same version.
    ///
    /// Two versions are the same when they share all of their stacks and
    /// rebuild progress. Value-equal queues built independently are not.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self.rebalance == other.rebalance
            && self.front.ptr_eq(&other.front)
            && self.front_copy.ptr_eq(&other.front_copy)
            && self.rear.ptr_eq(&other.rear)
            && self.rear_copy.ptr_eq(&other.rear_copy)
            && self.schedule.ptr_eq(&other.schedule)
    }

    /// Returns an iterator over the elements from front to back.
    ///
    /// The order is correct for every version, including versions captured
    /// in the middle of a rebuild.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentQueue;
    ///
    /// let queue: PersistentQueue<i32> = (1..=5).collect();
    /// let collected: Vec<&i32> = queue.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4, &5]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentQueueIterator<'_, T> {
        let mut segments: SmallVec<[Segment<'_, T>; MAX_SEGMENTS]> = SmallVec::new();
        match self.rebalance {
            Rebalance::Steady => {
                segments.push(Segment::TopDown(self.front.iter()));
                segments.push(Segment::BottomUp(&self.rear));
            }
            Rebalance::Rebuilding { phase, carry_over } => {
                segments.push(Segment::TopDown(self.front_copy.iter()));
                match phase {
                    RebuildPhase::ReverseFront => {
                        segments.push(Segment::BottomUp(&self.rear));
                    }
                    RebuildPhase::ReverseRear => {
                        segments.push(Segment::BottomUp(&self.rear));
                        segments.push(Segment::TopDown(self.front.iter()));
                    }
                    RebuildPhase::Drain => {
                        // The top of `front` repeats the tail of `front_copy`.
                        let transferred = self.front_copy.len() - carry_over;
                        let mut rebuilt = self.front.iter();
                        if transferred > 0 {
                            rebuilt.nth(transferred - 1);
                        }
                        segments.push(Segment::TopDown(rebuilt));
                    }
                }
                segments.push(Segment::BottomUp(&self.rear_copy));
            }
        }
        segments.reverse();
        PersistentQueueIterator {
            current: None,
            segments,
            remaining: self.length,
        }
    }

    /// Returns `true` if any element equals `element`.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|candidate| candidate == element)
    }

    /// The stack whose top is the next element to leave.
    fn serving_stack(&self) -> &PersistentStack<T> {
        match self.rebalance {
            Rebalance::Rebuilding { carry_over, .. } if carry_over > 0 => &self.front_copy,
            _ => &self.front,
        }
    }

    #[cfg(test)]
    pub(crate) const fn is_rebuilding(&self) -> bool {
        matches!(self.rebalance, Rebalance::Rebuilding { .. })
    }

    const fn empty_error(operation: &'static str) -> EmptyCollectionError {
        EmptyCollectionError::new(COLLECTION_NAME, operation)
    }
}

impl<T: Clone> PersistentQueue<T> {
    /// Creates a queue holding a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().enqueue(element)
    }

    /// Returns a new version with `element` at the back.
    ///
    /// # Complexity
    ///
    /// O(1) worst case
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentQueue;
    ///
    /// let queue = PersistentQueue::new().enqueue(1);
    /// let extended = queue.enqueue(2);
    /// assert_eq!(queue.len(), 1);
    /// assert_eq!(extended.to_vec(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn enqueue(&self, element: T) -> Self {
        self.enqueue_counted(element).0
    }

    /// Returns the front element together with the version without it.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the queue is empty.
    ///
    /// # Complexity
    ///
    /// O(1) worst case
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentQueue;
    ///
    /// let queue = PersistentQueue::new().enqueue(1).enqueue(2);
    /// let (front, rest) = queue.dequeue().unwrap();
    /// assert_eq!(*front, 1);
    /// assert_eq!(rest.to_vec(), vec![2]);
    /// ```
    pub fn dequeue(&self) -> Result<(&T, Self), EmptyCollectionError> {
        self.dequeue_counted()
            .map(|(element, next, _)| (element, next))
    }

    /// Like [`dequeue`](Self::dequeue), but reports an empty queue with `None`.
    ///
    /// The returned version is the receiver itself when the queue is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pfds::persistent::PersistentQueue;
    ///
    /// let empty: PersistentQueue<i32> = PersistentQueue::new();
    /// let (element, same) = empty.try_dequeue();
    /// assert_eq!(element, None);
    /// assert!(same.ptr_eq(&empty));
    /// ```
    #[must_use]
    pub fn try_dequeue(&self) -> (Option<&T>, Self) {
        match self.dequeue() {
            Ok((element, next)) => (Some(element), next),
            Err(_) => (None, self.clone()),
        }
    }

    /// Copies the elements into a `Vec`, front first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Enqueues and reports the number of rebuild moves performed.
    pub(crate) fn enqueue_counted(&self, element: T) -> (Self, usize) {
        let mut next = self.clone();
        match next.rebalance {
            Rebalance::Steady => next.rear = next.rear.push(element),
            Rebalance::Rebuilding { .. } => next.rear_copy = next.rear_copy.push(element),
        }
        next.length += 1;
        let moves = next.advance();
        (next, moves)
    }

    /// Dequeues and reports the number of rebuild moves performed.
    pub(crate) fn dequeue_counted(&self) -> Result<(&T, Self, usize), EmptyCollectionError> {
        if self.is_empty() {
            return Err(Self::empty_error("dequeue"));
        }
        let mut next = self.clone();
        next.length -= 1;
        let element = match self.rebalance {
            Rebalance::Rebuilding { phase, carry_over } if carry_over > 0 => {
                let (element, rest) = self
                    .front_copy
                    .pop()
                    .map_err(|_| Self::empty_error("dequeue"))?;
                next.front_copy = if carry_over == 1 {
                    PersistentStack::new()
                } else {
                    rest
                };
                next.rebalance = Rebalance::Rebuilding {
                    phase,
                    carry_over: carry_over - 1,
                };
                element
            }
            rebalance => {
                debug_assert!(
                    matches!(
                        rebalance,
                        Rebalance::Steady
                            | Rebalance::Rebuilding {
                                phase: RebuildPhase::Drain,
                                ..
                            }
                    ),
                    "old front exhausted before the rebuilt front was assembled"
                );
                let (element, rest) = self
                    .front
                    .pop()
                    .map_err(|_| Self::empty_error("dequeue"))?;
                next.front = rest;
                element
            }
        };
        let moves = next.advance();
        Ok((element, next, moves))
    }

    /// Restores the balance invariant and spends this operation's rebuild
    /// budget. Only ever called on a version that has not been handed out.
    fn advance(&mut self) -> usize {
        let mut moves = 0;
        loop {
            match self.rebalance {
                Rebalance::Steady => {
                    if self.rear.len() <= self.front.len() {
                        return moves;
                    }
                    self.begin_rebuild();
                }
                Rebalance::Rebuilding { phase, carry_over } => {
                    let source = match phase {
                        RebuildPhase::ReverseFront => &self.front,
                        RebuildPhase::ReverseRear => &self.rear,
                        RebuildPhase::Drain => &self.schedule,
                    };
                    if source.is_empty() {
                        self.enter_next_phase(phase, carry_over);
                        continue;
                    }
                    if moves == REBUILD_STEPS_PER_OPERATION {
                        return moves;
                    }
                    match phase {
                        RebuildPhase::ReverseFront => {
                            move_top(&mut self.front, &mut self.schedule);
                        }
                        RebuildPhase::ReverseRear => move_top(&mut self.rear, &mut self.front),
                        RebuildPhase::Drain => self.drain_one(carry_over),
                    }
                    moves += 1;
                }
            }
        }
    }

    fn begin_rebuild(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            front = self.front.len(),
            rear = self.rear.len(),
            "starting queue rebuild"
        );
        self.front_copy = self.front.clone();
        self.rebalance = Rebalance::Rebuilding {
            phase: RebuildPhase::ReverseFront,
            carry_over: self.front.len(),
        };
    }

    fn enter_next_phase(&mut self, phase: RebuildPhase, carry_over: usize) {
        let phase = match phase {
            RebuildPhase::ReverseFront => RebuildPhase::ReverseRear,
            RebuildPhase::ReverseRear => RebuildPhase::Drain,
            RebuildPhase::Drain => {
                self.finish_rebuild();
                return;
            }
        };
        self.rebalance = Rebalance::Rebuilding { phase, carry_over };
    }

    fn drain_one(&mut self, carry_over: usize) {
        if carry_over == 0 {
            let (_, rest) = self.schedule.try_pop();
            self.schedule = rest;
            return;
        }
        move_top(&mut self.schedule, &mut self.front);
        let carry_over = carry_over - 1;
        if carry_over == 0 {
            self.front_copy = PersistentStack::new();
        }
        self.rebalance = Rebalance::Rebuilding {
            phase: RebuildPhase::Drain,
            carry_over,
        };
    }

    fn finish_rebuild(&mut self) {
        self.front_copy = PersistentStack::new();
        self.rear = std::mem::take(&mut self.rear_copy);
        self.rebalance = Rebalance::Steady;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            front = self.front.len(),
            rear = self.rear.len(),
            "queue rebuild complete"
        );
    }
}

fn move_top<T: Clone>(source: &mut PersistentStack<T>, target: &mut PersistentStack<T>) {
    let (element, rest) = source.try_pop();
    if let Some(element) = element {
        *target = target.push(element.clone());
    }
    *source = rest;
}

// =============================================================================
// Iterator Implementation
// =============================================================================

enum Segment<'a, T> {
    TopDown(PersistentStackIterator<'a, T>),
    BottomUp(&'a PersistentStack<T>),
}

enum Cursor<'a, T> {
    TopDown(PersistentStackIterator<'a, T>),
    /// Elements collected top to bottom and handed out from the end.
    BottomUp(Vec<&'a T>),
}

impl<'a, T> Segment<'a, T> {
    fn open(self) -> Cursor<'a, T> {
        match self {
            Self::TopDown(iterator) => Cursor::TopDown(iterator),
            Self::BottomUp(stack) => Cursor::BottomUp(stack.iter().collect()),
        }
    }
}

/// An iterator over references to the elements of a [`PersistentQueue`],
/// from front to back.
pub struct PersistentQueueIterator<'a, T> {
    current: Option<Cursor<'a, T>>,
    /// Segments not yet opened, last one first.
    segments: SmallVec<[Segment<'a, T>; MAX_SEGMENTS]>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentQueueIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let element = match &mut self.current {
                Some(Cursor::TopDown(iterator)) => iterator.next(),
                Some(Cursor::BottomUp(elements)) => elements.pop(),
                None => None,
            };
            if let Some(element) = element {
                self.remaining -= 1;
                return Some(element);
            }
            self.current = Some(self.segments.pop()?.open());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentQueueIterator<'_, T> {}

impl<T> std::iter::FusedIterator for PersistentQueueIterator<'_, T> {}

/// An owning iterator over the elements of a [`PersistentQueue`], from front
/// to back.
pub struct PersistentQueueIntoIterator<T> {
    queue: PersistentQueue<T>,
}

impl<T: Clone> Iterator for PersistentQueueIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (element, rest) = self.queue.try_dequeue();
        let element = element.cloned();
        self.queue = rest;
        element
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentQueueIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentQueue<T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            front_copy: self.front_copy.clone(),
            rear: self.rear.clone(),
            rear_copy: self.rear_copy.clone(),
            schedule: self.schedule.clone(),
            rebalance: self.rebalance,
            length: self.length,
        }
    }
}

impl<T> Default for PersistentQueue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Enqueues the elements in iteration order.
impl<T: Clone> FromIterator<T> for PersistentQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |queue, element| queue.enqueue(element))
    }
}

impl<T: Clone> IntoIterator for PersistentQueue<T> {
    type Item = T;
    type IntoIter = PersistentQueueIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentQueueIntoIterator { queue: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentQueue<T> {
    type Item = &'a T;
    type IntoIter = PersistentQueueIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentQueue<T> {
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
impl<T: serde::Serialize> serde::Serialize for PersistentQueue<T> {
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
struct PersistentQueueVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentQueueVisitor<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    type Value = PersistentQueue<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence ordered from front to back")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut queue = PersistentQueue::new();
        while let Some(element) = seq.next_element()? {
            queue = queue.enqueue(element);
        }
        Ok(queue)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentQueue<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentQueueVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
