//! An ordered map backed by a height-balanced (AVL) binary search tree.
//!
//! [`AvlTree`] maps unique, totally ordered keys to values. Lookups,
//! insertions and removals are `O(log n)` and iterative: a structural change
//! records the path it descends, then walks back up it recomputing heights
//! and applying single or double rotations wherever a subtree's balance
//! factor reaches ±2.
//!
//! The tree can be walked in three orders (see [`TraversalOrder`]):
//!
//! * ascending key order,
//! * descending key order,
//! * level order (breadth-first), which rebuilds a tree of identical shape
//!   when its output is inserted into an empty tree.
//!
//! ```
//! use avlmap::{AvlTree, Error};
//!
//! let mut t = AvlTree::new();
//!
//! for k in [5, 3, 8, 1, 4, 7, 9] {
//!     t.insert(k, k * 10)?;
//! }
//!
//! // Inserts are strict: an existing key is never overwritten.
//! assert_eq!(t.insert(5, 0), Err(Error::DuplicateKey));
//! assert_eq!(t.get(&5), Ok(&50));
//!
//! // Removal of a missing key is not an error.
//! assert_eq!(t.remove(&3), Some((3, 30)));
//! assert_eq!(t.remove(&3), None);
//!
//! let keys = t.iter().map(|(k, _v)| *k).collect::<Vec<_>>();
//! assert_eq!(keys, [1, 4, 5, 7, 8, 9]);
//! # Ok::<(), Error>(())
//! ```
//!
//! Structural changes emit [`tracing`] events at `TRACE` level, and clearing
//! the tree emits a `DEBUG` event.

mod error;
mod iter;
mod node;
mod path;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::*;
pub use iter::{IntoIter, Iter, TraversalOrder};
pub use tree::*;
