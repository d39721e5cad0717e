//! A balanced, immutable k-d tree over [`Point`][crate::Point]s.
//!
//! Build a tree with [`KdTree::build`] or incrementally through a [`KdTreeBuilder`], then walk
//! it with a [`Cursor`] / [`Iter`] or query it with [`find_nearest_pruned`] and
//! [`find_nearest_brute_force`].

#![warn(missing_docs)]

mod builder;
mod index;
mod nearest;
mod traversal;

pub use builder::KdTreeBuilder;
pub use index::KdTree;
pub use nearest::{find_nearest_brute_force, find_nearest_pruned};
pub use traversal::{Cursor, Iter, Node};
