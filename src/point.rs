//! Owned, fixed-dimensionality points.

use std::fmt;
use std::ops::{Index, IndexMut};

use geo_traits::{CoordTrait, Dimensions};
use tinyvec::TinyVec;

use crate::error::{KdIndexError, Result};
use crate::r#type::Coordinate;

/// A point in k-dimensional space.
///
/// The dimensionality is fixed when the point is created. Up to four coordinates are stored
/// inline; larger points spill to the heap.
///
/// [`Point::default`] creates a zero-dimensional placeholder. It is the state a point is left in
/// after it has been moved into a [`KdTree`][crate::kdtree::KdTree], and it is rejected by tree
/// construction and queries.
///
/// # Equality
///
/// `==` never fails: points of different dimensionality simply compare unequal. When comparing
/// a mismatched pair should be an error, use [`Point::try_eq`], which returns
/// [`KdIndexError::DimensionMismatch`] instead of `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point<N: Coordinate> {
    coords: TinyVec<[N; 4]>,
}

impl<N: Coordinate> Point<N> {
    /// Create a point with `dims` dimensions, all coordinates zero.
    pub fn new(dims: usize) -> Self {
        std::iter::repeat(N::zero()).take(dims).collect()
    }

    /// Create a point by copying the coordinates of any [`CoordTrait`] implementation.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        (0..coord.dim().size())
            .map(|i| coord.nth_or_panic(i))
            .collect()
    }

    /// The number of dimensions of this point.
    #[inline]
    pub fn dims(&self) -> usize {
        self.coords.len()
    }

    /// The coordinates of this point, in axis order.
    #[inline]
    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    /// Iterate over the coordinates of this point, in axis order.
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.coords.iter()
    }

    /// Checked coordinate access.
    pub fn get(&self, index: usize) -> Result<N> {
        self.coords
            .get(index)
            .copied()
            .ok_or(KdIndexError::IndexOutOfRange {
                index,
                dims: self.dims(),
            })
    }

    /// Squared Euclidean distance between this point and `other`.
    ///
    /// Fails with [`KdIndexError::DimensionMismatch`] if the two points have a different number
    /// of dimensions.
    ///
    /// # Panics
    ///
    /// With integer coordinates the squared distance is computed in `N`. If it overflows, this
    /// panics in debug builds and wraps in release builds.
    pub fn distance_to(&self, other: &Point<N>) -> Result<N> {
        self.check_same_dims(other)?;
        Ok(sq_dist(self, other))
    }

    /// Coordinate-wise equality.
    ///
    /// Fails with [`KdIndexError::DimensionMismatch`] when the two points have a different
    /// number of dimensions, where `==` would return `false`.
    pub fn try_eq(&self, other: &Point<N>) -> Result<bool> {
        self.check_same_dims(other)?;
        Ok(self.coords.iter().zip(other.iter()).all(|(a, b)| a == b))
    }

    pub(crate) fn check_same_dims(&self, other: &Point<N>) -> Result<()> {
        if self.dims() != other.dims() {
            return Err(KdIndexError::DimensionMismatch {
                expected: self.dims(),
                found: other.dims(),
            });
        }
        Ok(())
    }
}

/// Squared Euclidean distance without a dimensionality check.
///
/// Callers must have verified that both points share their dimensionality.
#[inline]
pub(crate) fn sq_dist<N: Coordinate>(a: &Point<N>, b: &Point<N>) -> N {
    debug_assert_eq!(a.dims(), b.dims());
    a.iter().zip(b.iter()).fold(N::zero(), |total, (&x, &y)| {
        let d = x.abs_delta(y);
        total + d * d
    })
}

impl<N: Coordinate> Index<usize> for Point<N> {
    type Output = N;

    fn index(&self, index: usize) -> &N {
        &self.coords[index]
    }
}

impl<N: Coordinate> IndexMut<usize> for Point<N> {
    fn index_mut(&mut self, index: usize) -> &mut N {
        &mut self.coords[index]
    }
}

impl<N: Coordinate> FromIterator<N> for Point<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}

impl<N: Coordinate> From<Vec<N>> for Point<N> {
    fn from(value: Vec<N>) -> Self {
        value.into_iter().collect()
    }
}

impl<N: Coordinate> From<&[N]> for Point<N> {
    fn from(value: &[N]) -> Self {
        value.iter().copied().collect()
    }
}

impl<N: Coordinate, const K: usize> From<[N; K]> for Point<N> {
    fn from(value: [N; K]) -> Self {
        value.into_iter().collect()
    }
}

impl<N: Coordinate + fmt::Display> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

impl<N: Coordinate> CoordTrait for Point<N> {
    type T = N;

    fn dim(&self) -> Dimensions {
        match self.dims() {
            2 => Dimensions::Xy,
            3 => Dimensions::Xyz,
            4 => Dimensions::Xyzm,
            n => Dimensions::Unknown(n),
        }
    }

    fn x(&self) -> Self::T {
        self.coords[0]
    }

    fn y(&self) -> Self::T {
        self.coords[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match self.coords.get(n) {
            Some(c) => *c,
            None => panic!("Invalid index of coord"),
        }
    }
}
