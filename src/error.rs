use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdIndexError {
    /// A point dimensionality that cannot be indexed, i.e. zero-dimensional points passed to tree
    /// construction.
    #[error("Invalid point dimensionality: {dims}")]
    InvalidDimension { dims: usize },

    /// Two points, or a point and a tree, live in spaces of different dimensionality.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Coordinate access outside of `[0, dims)`.
    #[error("Index {index} out of range for point with {dims} dimensions")]
    IndexOutOfRange { index: usize, dims: usize },

    /// Tree construction called without any points.
    #[error("Cannot build a tree from zero points")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, KdIndexError>;
