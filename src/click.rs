//! Turning a click into a segment.

use crate::geometry::{LineSegment, Point};

/// Length, in canvas units, of the segment produced by a click.
pub const DEFAULT_SEGMENT_LENGTH: f64 = 100.0;

/// Horizontal segment of [`DEFAULT_SEGMENT_LENGTH`] extending right of `at`.
pub fn segment_from_click(at: Point) -> LineSegment {
    segment_from_click_with_length(at, DEFAULT_SEGMENT_LENGTH)
}

/// Horizontal segment of `length` canvas units starting at `at`.
///
/// Not clipped to the canvas; the right end may lie past the edge.
pub fn segment_from_click_with_length(at: Point, length: f64) -> LineSegment {
    LineSegment::new(at, at.offset(length, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_produces_fixed_horizontal_segment() {
        let s = segment_from_click(Point::new(50.0, 75.0));
        assert_eq!(s, LineSegment::new(Point::new(50.0, 75.0), Point::new(150.0, 75.0)));
    }

    #[test]
    fn negative_and_out_of_bounds_clicks_are_kept() {
        let s = segment_from_click(Point::new(-20.0, 5000.0));
        assert_eq!(s.coords(), [-20.0, 5000.0, 80.0, 5000.0]);
    }

    #[test]
    fn custom_length() {
        let s = segment_from_click_with_length(Point::new(1.0, 2.0), 40.0);
        assert_eq!(s.length(), 40.0);
        assert_eq!(s.dy(), 0.0);
    }
}
