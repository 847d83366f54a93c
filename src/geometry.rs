//! Geometry types in canvas space.
//!
//! Canvas space has its origin at the top-left corner of the drawing surface
//! and extends to the current [`CanvasSize`]. Every stored [`LineSegment`] is
//! expressed relative to the size that is authoritative at the time of reading.

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// A straight segment drawn from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub p1: Point,
    pub p2: Point,
}

impl LineSegment {
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Flattened coordinates `[x1, y1, x2, y2]`.
    pub fn coords(&self) -> [f64; 4] {
        [self.p1.x, self.p1.y, self.p2.x, self.p2.y]
    }

    pub fn dx(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    pub fn dy(&self) -> f64 {
        self.p2.y - self.p1.y
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.dx().hypot(self.dy())
    }

    /// Build a new segment by mapping both endpoints.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self::new(f(self.p1), f(self.p2))
    }
}

/// Logical size of the drawing surface.
///
/// Use [`CanvasSize::new`] at any boundary that accepts user or file input; it
/// rejects non-positive and non-finite dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Size of a freshly opened canvas.
    pub const DEFAULT: Self = Self {
        width: 1200.0,
        height: 800.0,
    };

    pub fn new(width: f64, height: f64) -> Result<Self> {
        let size = Self { width, height };
        if size.is_valid() {
            Ok(size)
        } else {
            Err(CanvasError::invalid_size(width, height))
        }
    }

    /// Both dimensions positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Whether `p` lies inside `[0, width] x [0, height]`.
    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_size_rejects_degenerate_dimensions() {
        assert!(CanvasSize::new(0.0, 10.0).is_err());
        assert!(CanvasSize::new(10.0, -1.0).is_err());
        assert!(CanvasSize::new(f64::NAN, 10.0).is_err());
        assert!(CanvasSize::new(f64::INFINITY, 10.0).is_err());
        assert_eq!(
            CanvasSize::new(300.0, 200.0).unwrap(),
            CanvasSize {
                width: 300.0,
                height: 200.0
            }
        );
    }

    #[test]
    fn default_size_is_1200_by_800() {
        assert_eq!(CanvasSize::default().to_string(), "1200x800");
    }

    #[test]
    fn segment_length_and_coords() {
        let s = LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(s.length(), 5.0);
        assert_eq!(s.coords(), [0.0, 0.0, 3.0, 4.0]);
    }

    #[test]
    fn contains_includes_edges() {
        let size = CanvasSize::DEFAULT;
        assert!(size.contains(Point::new(0.0, 0.0)));
        assert!(size.contains(Point::new(1200.0, 800.0)));
        assert!(!size.contains(Point::new(1200.5, 10.0)));
        assert!(!size.contains(Point::new(-1.0, 10.0)));
    }
}
