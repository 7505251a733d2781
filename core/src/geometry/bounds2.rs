//! 2D Axis Aligned Bounding Boxes.

use crate::geometry::*;
use crate::pbrt::*;
use itertools::{iproduct, Product};
use num_traits::Num;
use std::fmt;
use std::ops::Range;

/// 2D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds2<T: Num> {
    /// Minimum bounds.
    pub p_min: Point2<T>,

    /// Maximum bounds.
    pub p_max: Point2<T>,
}

/// 2-D bounding box containing `Float` points.
pub type Bounds2f = Bounds2<Float>;

/// 2-D bounding box containing `Int` points.
pub type Bounds2i = Bounds2<Int>;

impl<T: Num + Copy> Bounds2<T> {
    /// Creates a new 2D bounding box from 2 points. The minimum and maximum bounds
    /// are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point2<T>, p2: Point2<T>) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self {
            p_min: Point2::new(min(p1.x, p2.x), min(p1.y, p2.y)),
            p_max: Point2::new(max(p1.x, p2.x), max(p1.y, p2.y)),
        }
    }

    /// Returns true if the bounding box describes an empty box where any the
    /// components of p_max are less than p_min.
    pub fn is_empty(&self) -> bool
    where
        T: PartialOrd,
    {
        self.p_max.x < self.p_min.x || self.p_max.y < self.p_min.y
    }

    /// Returns the extent of the box along the x-axis and y-axis.
    pub fn extent(&self) -> Point2<T> {
        Point2::new(self.p_max.x - self.p_min.x, self.p_max.y - self.p_min.y)
    }

    /// Returns the area of the bounding box.
    pub fn area(&self) -> T
    where
        T: PartialOrd,
    {
        if self.is_empty() {
            T::zero()
        } else {
            let d = self.extent();
            d.x * d.y
        }
    }

    /// Returns true if a point is inside the bounding box. The upper boundary
    /// is considered out of bounds. This is useful for integer-typed bounds.
    ///
    /// * `p` - The point.
    pub fn contains_exclusive(&self, p: &Point2<T>) -> bool
    where
        T: PartialOrd,
    {
        p.x >= self.p_min.x && p.x < self.p_max.x && p.y >= self.p_min.y && p.y < self.p_max.y
    }
}

impl<T: Num + fmt::Display> fmt::Display for Bounds2<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.p_min, self.p_max)
    }
}

/// An iterator that can step through integer coordinates in a bounding box
/// in a left-to-right (x-axis) and top-to-bottom (y-axis) scan order. The
/// maximum bounds are exclusive.
pub struct Bounds2iIterator {
    /// The iterator that will supply points.
    p: Product<Range<Int>, Range<Int>>,
}

impl IntoIterator for Bounds2i {
    type Item = Point2i;
    type IntoIter = Bounds2iIterator;

    /// Create an iterator for `Bounds2i`.
    fn into_iter(self) -> Self::IntoIter {
        Bounds2iIterator {
            p: iproduct!(self.p_min.y..self.p_max.y, self.p_min.x..self.p_max.x),
        }
    }
}

impl Iterator for Bounds2iIterator {
    type Item = Point2i;

    /// Get the next point.
    fn next(&mut self) -> Option<Self::Item> {
        self.p.next().map(|(y, x)| Point2i::new(x, y))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
