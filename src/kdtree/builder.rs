use std::cmp;

use tracing::debug;

use crate::error::{KdIndexError, Result};
use crate::kdtree::index::{KdTree, TreeNode};
use crate::point::Point;
use crate::r#type::Coordinate;

/// A builder to create a [`KdTree`] from points added one at a time.
///
/// Dimensionality is checked as each point is added, so [`finish`][Self::finish] only fails
/// when no points were added.
#[derive(Debug, Clone)]
pub struct KdTreeBuilder<N: Coordinate> {
    points: Vec<Point<N>>,
    dims: usize,
}

impl<N: Coordinate> KdTreeBuilder<N> {
    /// Create a new builder for points with `dims` dimensions.
    pub fn new(dims: usize) -> Self {
        Self::with_capacity(dims, 0)
    }

    /// Create a new builder for points with `dims` dimensions, with room for `num_items` points.
    pub fn with_capacity(dims: usize, num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
            dims,
        }
    }

    /// The dimensionality every added point must have.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The number of points added so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points have been added yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: Point<N>) -> Result<usize> {
        if self.dims == 0 {
            return Err(KdIndexError::InvalidDimension { dims: 0 });
        }
        if point.dims() != self.dims {
            return Err(KdIndexError::DimensionMismatch {
                expected: self.dims,
                found: point.dims(),
            });
        }
        self.points.push(point);
        Ok(self.points.len() - 1)
    }

    /// Add a point given as a coordinate slice, returning its insertion index.
    pub fn add_coords(&mut self, coords: &[N]) -> Result<usize> {
        self.add(Point::from(coords))
    }

    /// Consume this builder, performing the median splits and generating a tree ready for
    /// queries.
    pub fn finish(mut self) -> Result<KdTree<N>> {
        build_tree(&mut self.points)
    }
}

/// Validate `points` and build a tree, moving each point out of the slice.
///
/// Nothing is moved unless validation succeeds.
pub(crate) fn build_tree<N: Coordinate>(points: &mut [Point<N>]) -> Result<KdTree<N>> {
    let dims = common_dims(points)?;

    let mut nodes = Vec::with_capacity(points.len());
    let height = match build_recursive(&mut nodes, points, 0, dims, None) {
        Some((_, height)) => height,
        None => return Err(KdIndexError::EmptyInput),
    };

    debug!(
        num_points = nodes.len(),
        dims, height, "built balanced k-d tree"
    );

    Ok(KdTree {
        nodes,
        dims,
        height,
    })
}

/// The dimensionality shared by all points.
fn common_dims<N: Coordinate>(points: &[Point<N>]) -> Result<usize> {
    let first = points.first().ok_or(KdIndexError::EmptyInput)?;
    let dims = first.dims();
    if dims == 0 {
        return Err(KdIndexError::InvalidDimension { dims });
    }
    if let Some(other) = points.iter().find(|p| p.dims() != dims) {
        return Err(KdIndexError::DimensionMismatch {
            expected: dims,
            found: other.dims(),
        });
    }
    Ok(dims)
}

/// Recursively build the subtree for `points`, returning the arena index of its root and its
/// height. An empty range produces no subtree.
fn build_recursive<N: Coordinate>(
    nodes: &mut Vec<TreeNode<N>>,
    points: &mut [Point<N>],
    depth: usize,
    dims: usize,
    parent: Option<usize>,
) -> Option<(usize, usize)> {
    if points.is_empty() {
        return None;
    }

    let axis = depth % dims;

    // upper median for even lengths
    let m = points.len() / 2;

    // partition so that [..m] lie at or below the median and [m + 1..] at or above it along
    // this axis
    select(points, m, 0, points.len() - 1, axis);

    let index = nodes.len();
    nodes.push(TreeNode {
        split_point: std::mem::take(&mut points[m]),
        split_axis: axis,
        left: None,
        right: None,
        parent,
    });

    let (left_points, rest) = points.split_at_mut(m);
    let right_points = &mut rest[1..];

    let left = build_recursive(nodes, left_points, depth + 1, dims, Some(index));
    let right = build_recursive(nodes, right_points, depth + 1, dims, Some(index));

    let node = &mut nodes[index];
    node.left = left.map(|(i, _)| i);
    node.right = right.map(|(i, _)| i);

    let child_height = cmp::max(left.map_or(0, |(_, h)| h), right.map_or(0, |(_, h)| h));
    Some((index, child_height + 1))
}

/// Custom Floyd-Rivest selection algorithm: reorder `points` so that [left..k-1] items are not
/// greater than the k-th item and [k+1..=right] are not smaller, along `axis`.
#[inline]
fn select<N: Coordinate>(
    points: &mut [Point<N>],
    k: usize,
    mut left: usize,
    mut right: usize,
    axis: usize,
) {
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select(points, k, new_left, new_right, axis);
        }

        let t = points[k][axis];
        let mut i = left;
        let mut j = right;

        points.swap(left, k);
        if points[right][axis] > t {
            points.swap(left, right);
        }

        while i < j {
            points.swap(i, j);
            i += 1;
            j -= 1;
            while points[i][axis] < t {
                i += 1;
            }
            while points[j][axis] > t {
                j -= 1;
            }
        }

        if points[left][axis] == t {
            points.swap(left, j);
        } else {
            j += 1;
            points.swap(j, right);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            right = j.saturating_sub(1);
        }
    }
}
