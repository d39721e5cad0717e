//! Nearest-neighbor queries.

use geo_traits::CoordTrait;
#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::trace;

use crate::error::{KdIndexError, Result};
use crate::kdtree::KdTree;
use crate::point::{sq_dist, Point};
use crate::r#type::Coordinate;

/// Find the point nearest to `query` by visiting every node of the tree.
///
/// Returns a copy of the nearest point. On exact ties the first point in traversal order wins.
/// Fails with [`KdIndexError::DimensionMismatch`] if `query` does not match the tree.
///
/// # Panics
///
/// With integer coordinates the squared distance is computed in `N`. If it overflows, this
/// panics in debug builds and wraps in release builds.
pub fn find_nearest_brute_force<N: Coordinate>(
    tree: &KdTree<N>,
    query: &Point<N>,
) -> Result<Point<N>> {
    tree.check_query(query)?;

    let mut best: Option<(&Point<N>, N)> = None;
    let mut cursor = tree.begin();
    while let Some(point) = cursor.get() {
        let dist = sq_dist(point, query);
        let is_better = match best {
            Some((_, best_dist)) => dist < best_dist,
            None => true,
        };
        if is_better {
            best = Some((point, dist));
        }
        cursor.advance();
    }

    best.map(|(point, _)| point.clone())
        .ok_or(KdIndexError::EmptyInput)
}

/// Find the point nearest to `query` with a recursive descent that skips subtrees which cannot
/// hold a closer point.
///
/// Returns a copy of the nearest point. On exact ties the result may differ from
/// [`find_nearest_brute_force`], but its distance to `query` never does.
/// Fails with [`KdIndexError::DimensionMismatch`] if `query` does not match the tree.
///
/// # Panics
///
/// With integer coordinates the squared distance is computed in `N`. If it overflows, this
/// panics in debug builds and wraps in release builds.
pub fn find_nearest_pruned<N: Coordinate>(tree: &KdTree<N>, query: &Point<N>) -> Result<Point<N>> {
    let best = nearest_pruned(tree, query)?;
    Ok(tree.nodes[best.index].split_point.clone())
}

/// Running state of a pruned search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Best<N> {
    pub(crate) index: usize,
    pub(crate) dist: N,
    pub(crate) visited: usize,
}

pub(crate) fn nearest_pruned<N: Coordinate>(tree: &KdTree<N>, query: &Point<N>) -> Result<Best<N>> {
    tree.check_query(query)?;

    let mut best = Best {
        index: 0,
        dist: sq_dist(&tree.nodes[0].split_point, query),
        visited: 0,
    };
    search_recursive(tree, 0, query, &mut best);

    trace!(
        visited = best.visited,
        num_nodes = tree.len(),
        "pruned nearest-neighbor search"
    );
    Ok(best)
}

fn search_recursive<N: Coordinate>(
    tree: &KdTree<N>,
    index: usize,
    query: &Point<N>,
    best: &mut Best<N>,
) {
    let node = &tree.nodes[index];
    best.visited += 1;

    let dist = sq_dist(&node.split_point, query);
    if dist < best.dist {
        best.index = index;
        best.dist = dist;
    }

    let axis = node.split_axis;
    let q = query[axis];
    let s = node.split_point[axis];

    let (closer, farther) = if q > s {
        (node.right, node.left)
    } else {
        (node.left, node.right)
    };

    if let Some(child) = closer {
        search_recursive(tree, child, query, best);
    }

    // the farther side is only reachable if the sphere around the query with the current best
    // radius crosses the splitting plane
    let d = q.abs_delta(s);
    if d * d < best.dist {
        if let Some(child) = farther {
            search_recursive(tree, child, query, best);
        }
    }
}

impl<N: Coordinate> KdTree<N> {
    /// Find the point nearest to `query`. See [`find_nearest_pruned`].
    pub fn nearest(&self, query: &Point<N>) -> Result<Point<N>> {
        find_nearest_pruned(self, query)
    }

    /// Find the point nearest to `query` without pruning. See [`find_nearest_brute_force`].
    pub fn nearest_brute_force(&self, query: &Point<N>) -> Result<Point<N>> {
        find_nearest_brute_force(self, query)
    }

    /// Find the point nearest to any [`CoordTrait`] coordinate.
    pub fn nearest_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<Point<N>> {
        self.nearest(&Point::from_coord(coord))
    }

    /// Run one pruned query per entry of `queries`, returning results in the same order.
    ///
    /// With the `rayon` feature the queries run on rayon's thread pool. The first failing query
    /// fails the whole batch.
    pub fn nearest_batch(&self, queries: &[Point<N>]) -> Result<Vec<Point<N>>> {
        #[cfg(feature = "rayon")]
        {
            queries.par_iter().map(|query| self.nearest(query)).collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            queries.iter().map(|query| self.nearest(query)).collect()
        }
    }
}
