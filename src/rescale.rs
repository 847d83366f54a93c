//! Proportional remapping of stored geometry when the canvas is resized.
//!
//! Each axis is scaled independently: x by `new.width / old.width` and y by
//! `new.height / old.height`. A segment keeps its position as a fraction of
//! the canvas extent, but an anisotropic resize distorts its shape and length.
//! That distortion is the intended behaviour.
//!
//! An axis whose previous extent is zero has no defined factor; it falls back
//! to the identity (factor 1.0) so no non-finite value reaches the store.

use crate::geometry::{CanvasSize, LineSegment, Point};

/// Per-axis scale factors between two canvas sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Factors mapping coordinates expressed in `old` into `new`.
    pub fn between(old: CanvasSize, new: CanvasSize) -> Self {
        Self {
            x: axis_factor(old.width, new.width),
            y: axis_factor(old.height, new.height),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 1.0 && self.y == 1.0
    }

    /// Factors are equal on both axes, so shapes are preserved.
    pub fn is_uniform(&self) -> bool {
        self.x == self.y
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.x, p.y * self.y)
    }

    pub fn apply_segment(&self, s: &LineSegment) -> LineSegment {
        s.map_points(|p| self.apply(p))
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn axis_factor(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return 1.0;
    }
    let f = new / old;
    if f.is_finite() {
        f
    } else {
        1.0
    }
}

/// Map every segment from `old` canvas space into `new` canvas space.
///
/// Pure: the input is left untouched and a new sequence is returned in the
/// same order.
pub fn rescale(segments: &[LineSegment], old: CanvasSize, new: CanvasSize) -> Vec<LineSegment> {
    let factors = ScaleFactors::between(old, new);
    segments.iter().map(|s| factors.apply_segment(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: f64, h: f64) -> CanvasSize {
        CanvasSize {
            width: w,
            height: h,
        }
    }

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn quarter_scale_from_default() {
        let out = rescale(&[seg(100.0, 100.0, 200.0, 100.0)], size(1200.0, 800.0), size(300.0, 200.0));
        assert_eq!(out, vec![seg(25.0, 25.0, 50.0, 25.0)]);
    }

    #[test]
    fn anisotropic_scale_is_per_axis() {
        let out = rescale(&[seg(10.0, 10.0, 20.0, 20.0)], size(100.0, 100.0), size(200.0, 50.0));
        assert_eq!(out, vec![seg(20.0, 5.0, 40.0, 10.0)]);
    }

    #[test]
    fn zero_prior_extent_is_identity_on_that_axis() {
        let f = ScaleFactors::between(size(0.0, 100.0), size(300.0, 200.0));
        assert_eq!(f.x, 1.0);
        assert_eq!(f.y, 2.0);

        let out = rescale(&[seg(5.0, 5.0, 6.0, 6.0)], size(0.0, 0.0), size(300.0, 200.0));
        assert_eq!(out, vec![seg(5.0, 5.0, 6.0, 6.0)]);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![seg(1.0, 2.0, 3.0, 4.0)];
        let _ = rescale(&input, size(10.0, 10.0), size(20.0, 20.0));
        assert_eq!(input, vec![seg(1.0, 2.0, 3.0, 4.0)]);
    }

    #[test]
    fn same_size_is_identity() {
        let f = ScaleFactors::between(size(600.0, 400.0), size(600.0, 400.0));
        assert!(f.is_identity());
        assert!(f.is_uniform());
    }
}
