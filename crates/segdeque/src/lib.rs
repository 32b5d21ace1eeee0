//! Double-ended queue backed by a segmented array.
//!
//! Elements live in fixed-capacity blocks rather than one contiguous
//! buffer. A growable block map orders the blocks; an active window marks
//! which slots currently hold live elements. Pushing at either end is
//! amortized O(1), random access is O(1), and insert/erase at position `k`
//! costs O(min(k, n - k)).
//!
//! # Architecture
//!
//! ```text
//! SegDeque<T, B> (public container)
//! ├── BlockMap (Vec<Option<Block>>, slack at both ends)
//! │   └── Block × N (Box<[Option<T>]>, B slots each)
//! ├── Window (absolute head slot + len)
//! └── DequeConfig (growth factor, minimum map size)
//! ```
//!
//! Growing past the map's slack either recenters the live blocks inside
//! the existing map or moves every block handle into a larger map. Element
//! data never moves during map growth; only the block handles do.
//!
//! # Safety
//!
//! Slots are `Option<T>`: constructing an element stores `Some`, destroying
//! one takes it back out. The crate contains no `unsafe` code.
//!
//! # Example
//!
//! ```
//! use segdeque::SegDeque;
//!
//! let mut deque: SegDeque<u32> = SegDeque::new();
//! deque.push_back(2);
//! deque.push_front(1);
//! deque.insert(2, 3);
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(deque.at(1), Ok(&2));
//! assert!(deque.at(3).is_err());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod block;
mod cmp;
pub mod config;
pub mod deque;
pub mod error;
mod guard;
pub mod iter;
mod map;
pub mod stats;
mod storage;
mod window;

// Public re-exports for the primary API surface.
pub use config::DequeConfig;
pub use deque::{SegDeque, DEFAULT_BLOCK_CAPACITY};
pub use error::DequeError;
pub use iter::{IntoIter, Iter, IterMut};
pub use stats::StorageStats;
