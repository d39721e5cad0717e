use std::fmt::Debug;

use num_traits::{Num, NumCast};

/// A trait for scalar types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Distances are always
/// squared Euclidean distances computed in `Self`, so integer coordinates never need a square
/// root. Callers using narrow integer types are responsible for keeping squared distances
/// within range.
pub trait Coordinate:
    private::Sealed + Num + NumCast + PartialOrd + Copy + Default + Debug + Send + Sync
{
    /// Absolute difference `|self - other|`, computed without going below zero so that unsigned
    /// types never underflow.
    #[inline]
    fn abs_delta(self, other: Self) -> Self {
        if self > other {
            self - other
        } else {
            other - self
        }
    }
}

impl Coordinate for i8 {}
impl Coordinate for u8 {}
impl Coordinate for i16 {}
impl Coordinate for u16 {}
impl Coordinate for i32 {}
impl Coordinate for u32 {}
impl Coordinate for i64 {}
impl Coordinate for u64 {}
impl Coordinate for f32 {}
impl Coordinate for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i64 {}
    impl Sealed for u64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod test {
    use super::Coordinate;

    #[test]
    fn abs_delta_unsigned() {
        assert_eq!(Coordinate::abs_delta(3u8, 10u8), 7);
        assert_eq!(Coordinate::abs_delta(10u8, 3u8), 7);
        assert_eq!(Coordinate::abs_delta(-2i32, 5i32), 7);
        assert_eq!(Coordinate::abs_delta(1.5f64, -1.0f64), 2.5);
    }
}
