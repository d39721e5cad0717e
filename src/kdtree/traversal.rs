//! Utilities to traverse the KdTree structure.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::kdtree::KdTree;
use crate::point::Point;
use crate::r#type::Coordinate;

/// A read-only view onto one node of a [`KdTree`].
///
/// A node is at the same time the root of a subtree and the point stored at that root.
pub struct Node<'a, N: Coordinate> {
    /// The tree that this node is a reference onto
    tree: &'a KdTree<N>,

    /// Index of this node in the tree's arena
    index: usize,
}

impl<'a, N: Coordinate> Node<'a, N> {
    pub(crate) fn new(tree: &'a KdTree<N>, index: usize) -> Self {
        Self { tree, index }
    }

    /// The point this node splits its subtree at.
    pub fn split_point(&self) -> &'a Point<N> {
        &self.tree.nodes[self.index].split_point
    }

    /// The axis this node splits on: `depth % dims`.
    pub fn split_axis(&self) -> usize {
        self.tree.nodes[self.index].split_axis
    }

    /// The dimensionality of every point in the tree.
    pub fn dims(&self) -> usize {
        self.tree.dims
    }

    /// The child node holding points at or below the split value.
    pub fn left_child(&self) -> Option<Node<'a, N>> {
        self.tree.nodes[self.index]
            .left
            .map(|index| Node::new(self.tree, index))
    }

    /// The child node holding points at or above the split value.
    pub fn right_child(&self) -> Option<Node<'a, N>> {
        self.tree.nodes[self.index]
            .right
            .map(|index| Node::new(self.tree, index))
    }

    /// The parent of this node, or `None` at the root.
    pub fn parent(&self) -> Option<Node<'a, N>> {
        self.tree.nodes[self.index]
            .parent
            .map(|index| Node::new(self.tree, index))
    }

    /// Distance from the root, which has depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.tree.nodes[self.index].parent;
        while let Some(index) = current {
            depth += 1;
            current = self.tree.nodes[index].parent;
        }
        depth
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let node = &self.tree.nodes[self.index];
        node.left.is_none() && node.right.is_none()
    }

    /// Returns `true` if this is the root of the tree.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.tree.nodes[self.index].parent.is_none()
    }
}

impl<N: Coordinate> Clone for Node<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: Coordinate> Copy for Node<'_, N> {}

impl<N: Coordinate> PartialEq for Node<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<N: Coordinate> Eq for Node<'_, N> {}

impl<N: Coordinate> fmt::Debug for Node<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("index", &self.index)
            .field("split_point", self.split_point())
            .field("split_axis", &self.split_axis())
            .finish()
    }
}

/// A forward-only position in the traversal order of a [`KdTree`].
///
/// Walks the tree using only child and parent links: no stack, no recursion, no allocation. The
/// past-the-end position is a distinguished state reached after the last node.
pub struct Cursor<'a, N: Coordinate> {
    tree: &'a KdTree<N>,
    node: Option<usize>,
}

impl<'a, N: Coordinate> Cursor<'a, N> {
    /// Position at the deepest, leftmost node: keep descending left, or right when there is no
    /// left child, until a leaf.
    pub(crate) fn begin(tree: &'a KdTree<N>) -> Self {
        let node = if tree.nodes.is_empty() {
            None
        } else {
            Some(descend(tree, 0))
        };
        Self { tree, node }
    }

    pub(crate) fn end(tree: &'a KdTree<N>) -> Self {
        Self { tree, node: None }
    }

    /// Returns `true` once the cursor has moved past the last node.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// The point at the current position, or `None` past the end.
    #[inline]
    pub fn get(&self) -> Option<&'a Point<N>> {
        self.node.map(|index| &self.tree.nodes[index].split_point)
    }

    /// The node at the current position, or `None` past the end.
    pub fn node(&self) -> Option<Node<'a, N>> {
        self.node.map(|index| Node::new(self.tree, index))
    }

    /// Move to the next node. Does nothing once past the end.
    pub fn advance(&mut self) {
        let nodes = &self.tree.nodes;
        let Some(mut current) = self.node else {
            return;
        };

        // the successor is the first node of the right subtree
        if let Some(right) = nodes[current].right {
            self.node = Some(descend(self.tree, right));
            return;
        }

        // otherwise climb out of right subtrees we have finished; the first ancestor reached
        // from its left side is next
        loop {
            match nodes[current].parent {
                Some(parent) if nodes[parent].right == Some(current) => current = parent,
                parent => {
                    self.node = parent;
                    return;
                }
            }
        }
    }
}

/// Follow left children, or the right child when there is no left one, down to a leaf.
fn descend<N: Coordinate>(tree: &KdTree<N>, mut index: usize) -> usize {
    loop {
        let node = &tree.nodes[index];
        match (node.left, node.right) {
            (Some(left), _) => index = left,
            (None, Some(right)) => index = right,
            (None, None) => return index,
        }
    }
}

impl<N: Coordinate> Clone for Cursor<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: Coordinate> Copy for Cursor<'_, N> {}

/// Two cursors are equal when both are past the end, or when they sit on the same node of the
/// same tree.
impl<N: Coordinate> PartialEq for Cursor<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b && ptr::eq(self.tree, other.tree),
            _ => false,
        }
    }
}

impl<N: Coordinate> Eq for Cursor<'_, N> {}

impl<N: Coordinate> fmt::Debug for Cursor<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("node", &self.node).finish()
    }
}

/// An iterator over references to every point of a [`KdTree`], in traversal order.
///
/// Created by [`KdTree::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, N: Coordinate> {
    cursor: Cursor<'a, N>,
    remaining: usize,
}

impl<'a, N: Coordinate> Iter<'a, N> {
    pub(crate) fn new(tree: &'a KdTree<N>) -> Self {
        Self {
            cursor: Cursor::begin(tree),
            remaining: tree.len(),
        }
    }
}

impl<'a, N: Coordinate> Iterator for Iter<'a, N> {
    type Item = &'a Point<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.cursor.get()?;
        self.cursor.advance();
        self.remaining = self.remaining.saturating_sub(1);
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N: Coordinate> ExactSizeIterator for Iter<'_, N> {}

impl<N: Coordinate> FusedIterator for Iter<'_, N> {}
