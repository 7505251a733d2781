//! 2-D Points

use crate::pbrt::*;
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

/// 2-D point containing `Int` values.
pub type Point2i = Point2<Int>;

impl Point2f {
    /// Point at the origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a new 2-D zero point.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero())
    }
}

impl<T: Num> Add for Point2<T> {
    type Output = Self;

    /// Adds the given point and returns the result.
    ///
    /// * `other` - The point to add.
    fn add(self, other: Self) -> Self::Output {
        Self::Output::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num + Copy> AddAssign for Point2<T> {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The point to add.
    fn add_assign(&mut self, other: Self) {
        *self = Self::new(self.x + other.x, self.y + other.y);
    }
}

impl From<Point2i> for Point2f {
    /// Convert a `Point2i` to `Point2f`.
    ///
    /// * `p` - The `Point2i` to convert.
    fn from(p: Point2i) -> Self {
        Self {
            x: p.x as Float,
            y: p.y as Float,
        }
    }
}

impl From<Point2<f64>> for Point2f {
    /// Narrow a double precision point to `Point2f`.
    ///
    /// * `p` - The `Point2<f64>` to convert.
    fn from(p: Point2<f64>) -> Self {
        Self {
            x: p.x as Float,
            y: p.y as Float,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Point2<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
