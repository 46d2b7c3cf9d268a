//! Error types for the persistent collections.
//!
//! The collections in this module have exactly one failure mode: asking an
//! empty version for an element. Every fallible operation reports it through
//! [`EmptyCollectionError`].

/// Represents an attempt to read or remove an element from an empty collection.
///
/// Returned by `pop`/`peek` on [`PersistentStack`](super::PersistentStack) and
/// `dequeue`/`peek` on [`PersistentQueue`](super::PersistentQueue). The
/// receiver is left untouched, so the caller can keep using it.
///
/// # Examples
///
/// ```rust
/// use pfds::persistent::{EmptyCollectionError, PersistentStack};
///
/// let stack: PersistentStack<i32> = PersistentStack::new();
/// let error = stack.pop().unwrap_err();
/// assert_eq!(
///     error,
///     EmptyCollectionError {
///         collection: "PersistentStack",
///         operation: "pop",
///     }
/// );
/// assert_eq!(format!("{error}"), "PersistentStack::pop: collection is empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyCollectionError {
    /// The name of the collection type that was empty.
    pub collection: &'static str,
    /// The name of the operation that required an element.
    pub operation: &'static str,
}

impl EmptyCollectionError {
    pub(crate) const fn new(collection: &'static str, operation: &'static str) -> Self {
        Self {
            collection,
            operation,
        }
    }
}

impl std::fmt::Display for EmptyCollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}::{}: collection is empty",
            self.collection, self.operation
        )
    }
}

impl std::error::Error for EmptyCollectionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PersistentStack", "pop", "PersistentStack::pop: collection is empty")]
    #[case("PersistentStack", "peek", "PersistentStack::peek: collection is empty")]
    #[case(
        "PersistentQueue",
        "dequeue",
        "PersistentQueue::dequeue: collection is empty"
    )]
    fn test_empty_collection_error_display(
        #[case] collection: &'static str,
        #[case] operation: &'static str,
        #[case] expected: &str,
    ) {
        let error = EmptyCollectionError::new(collection, operation);
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_empty_collection_error_is_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(EmptyCollectionError::new("PersistentQueue", "peek"));
        assert_eq!(error.to_string(), "PersistentQueue::peek: collection is empty");
        assert!(error.source().is_none());
    }
}
