//! # pfds
//!
//! Purely functional, persistent collections for Rust.
//!
//! ## Overview
//!
//! Every operation on these collections returns a new version and leaves the
//! receiver untouched. Versions share structure, so keeping old versions
//! around is cheap, and any version can be branched any number of times.
//!
//! - **`PersistentStack`**: immutable singly-linked LIFO stack
//! - **`PersistentQueue`**: real-time FIFO queue with worst-case O(1)
//!   `enqueue`/`dequeue`, built from five stacks and an incremental rebuild
//!
//! ## Feature Flags
//!
//! - `persistent`: The persistent collections (enabled by default)
//! - `arc`: Share nodes through `Arc` so versions are `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` as sequences in iteration order
//! - `tracing`: Emit `trace!` events when the queue starts and finishes a rebuild
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use pfds::prelude::*;
//!
//! let queue: PersistentQueue<i32> = (1..=5).collect();
//! let (front, rest) = queue.dequeue().unwrap();
//! assert_eq!(*front, 1);
//! assert_eq!(rest.len(), 4);
//! assert_eq!(queue.len(), 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use pfds::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "persistent")]
pub mod persistent;
