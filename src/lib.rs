#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod point;
mod r#type;

pub use error::{KdIndexError, Result};
pub use kdtree::{find_nearest_brute_force, find_nearest_pruned, KdTree, KdTreeBuilder};
pub use point::Point;
pub use r#type::Coordinate;

#[cfg(test)]
pub(crate) mod test;
