//! Grid geometry: cell [`Point`]s and the origin-anchored [`Range`] a grid
//! occupies.
//!
//! Y grows down. A range is walked in row-major order, which is also the
//! order dense vertex ids are handed out in.

use std::fmt;
use std::ops::Add;

/// A grid cell. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the step from `self` to `other` is a single diagonal move.
    #[inline]
    pub fn is_diagonal_to(self, other: Point) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }

    /// Cell coordinates as a position for spatial heuristics.
    #[inline]
    pub fn to_f64(self) -> (f64, f64) {
        (f64::from(self.x), f64::from(self.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, step: Self) -> Self {
        Self::new(self.x + step.x, self.y + step.y)
    }
}

/// The cells `(0, 0) ..< (width, height)` of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    width: i32,
    height: i32,
}

impl Range {
    /// Non-positive sizes give an empty range.
    #[inline]
    pub fn with_size(width: i32, height: i32) -> Self {
        let (width, height) = if width > 0 && height > 0 {
            (width, height)
        } else {
            (0, 0)
        };
        Self { width, height }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Row-major offset of `p`, or `None` outside the range.
    #[inline]
    pub fn index_of(self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// Every cell in row-major order.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
        }
    }
}

/// Row-major iterator over the cells of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.range.len() {
            return None;
        }
        let w = self.range.width as usize;
        let p = Point::new((self.next % w) as i32, (self.next / w) as i32);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.range.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_a_step() {
        assert_eq!(Point::new(1, 2) + Point::new(-1, 1), Point::new(0, 3));
    }

    #[test]
    fn diagonal_step_detection() {
        let p = Point::new(4, 4);
        assert!(p.is_diagonal_to(Point::new(5, 5)));
        assert!(p.is_diagonal_to(Point::new(3, 5)));
        assert!(!p.is_diagonal_to(Point::new(5, 4)));
        assert!(!p.is_diagonal_to(Point::new(6, 6)));
    }

    #[test]
    fn containment_is_half_open() {
        let r = Range::with_size(3, 2);
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn non_positive_sizes_are_empty() {
        for (w, h) in [(-3, 4), (4, -3), (0, 5), (-2, -2)] {
            let r = Range::with_size(w, h);
            assert!(r.is_empty());
            assert_eq!(r.iter().count(), 0);
        }
    }

    #[test]
    fn index_follows_iteration_order() {
        let r = Range::with_size(4, 3);
        let cells: Vec<_> = r.iter().collect();
        assert_eq!(r.iter().len(), 12);
        assert_eq!(cells[0], Point::new(0, 0));
        assert_eq!(cells[5], Point::new(1, 1));
        for (i, p) in cells.into_iter().enumerate() {
            assert_eq!(r.index_of(p), Some(i));
        }
        assert_eq!(r.index_of(Point::new(4, 0)), None);
    }
}
