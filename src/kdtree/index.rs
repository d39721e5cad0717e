use crate::error::{KdIndexError, Result};
use crate::kdtree::builder::build_tree;
use crate::kdtree::{Cursor, Iter, Node};
use crate::point::Point;
use crate::r#type::Coordinate;

/// One node of the tree arena.
///
/// Children are owned by their parent in the sense that they are only reachable through it; the
/// parent index is a plain back-reference used for upward traversal.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<N: Coordinate> {
    pub(crate) split_point: Point<N>,
    pub(crate) split_axis: usize,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
    pub(crate) parent: Option<usize>,
}

/// An immutable, balanced k-d tree.
///
/// Nodes live in a single arena addressed by index, with the root at index 0. Every node splits
/// its subtree at the median along axis `depth % dims`. A tree is never empty and cannot be
/// modified after construction, so any number of threads may query it at once.
#[derive(Debug, Clone)]
pub struct KdTree<N: Coordinate> {
    pub(crate) nodes: Vec<TreeNode<N>>,
    pub(crate) dims: usize,
    pub(crate) height: usize,
}

impl<N: Coordinate> KdTree<N> {
    /// Build a balanced tree, taking ownership of every point.
    ///
    /// All points must share the same, non-zero dimensionality. Fails with
    /// [`KdIndexError::EmptyInput`] when `points` is empty.
    pub fn build(mut points: Vec<Point<N>>) -> Result<Self> {
        build_tree(&mut points)
    }

    /// Build a balanced tree by moving every point out of `points`.
    ///
    /// On success each slot of `points` is left holding a zero-dimensional placeholder. On
    /// failure `points` is untouched.
    pub fn build_from_slice(points: &mut [Point<N>]) -> Result<Self> {
        build_tree(points)
    }

    /// The number of points in this tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a successfully built tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The dimensionality shared by every point in this tree.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The number of levels in this tree. A single point has height 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> Node<'_, N> {
        Node::new(self, 0)
    }

    /// A cursor at the first node of the traversal order.
    pub fn begin(&self) -> Cursor<'_, N> {
        Cursor::begin(self)
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, N> {
        Cursor::end(self)
    }

    /// Iterate over every point of the tree exactly once.
    ///
    /// The order follows the tree structure (left subtree, node, right subtree), not any
    /// coordinate value.
    pub fn iter(&self) -> Iter<'_, N> {
        Iter::new(self)
    }

    pub(crate) fn check_query(&self, query: &Point<N>) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(KdIndexError::EmptyInput);
        }
        if query.dims() != self.dims {
            return Err(KdIndexError::DimensionMismatch {
                expected: self.dims,
                found: query.dims(),
            });
        }
        Ok(())
    }
}

impl<N: Coordinate> TryFrom<Vec<Point<N>>> for KdTree<N> {
    type Error = KdIndexError;

    fn try_from(value: Vec<Point<N>>) -> Result<Self> {
        Self::build(value)
    }
}

impl<'a, N: Coordinate> IntoIterator for &'a KdTree<N> {
    type Item = &'a Point<N>;
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
