//! Text listing of the stored segments.
//!
//! One line per segment in insertion order, e.g. `points: 50, 75, 150, 75`.
//! Whole numbers print without a fractional part.

use crate::geometry::LineSegment;

/// Heading shown above the listing.
pub const LISTING_TITLE: &str = "Lines";

/// Format a single coordinate the way a browser prints a number.
///
/// Shortest round-trip digits; `-0` prints as `0`. Magnitudes of `1e21` and
/// above, or below `1e-6`, switch to exponent form with an explicit sign
/// (`1e+21`, `1.5e-7`).
pub fn format_coord(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    let abs = v.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let sci = format!("{v:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => sci,
        };
    }
    format!("{}", v)
}

/// `points: x1, y1, x2, y2`
pub fn format_segment(segment: &LineSegment) -> String {
    let coords: Vec<String> = segment.coords().iter().map(|&c| format_coord(c)).collect();
    format!("points: {}", coords.join(", "))
}

pub fn listing_lines(segments: &[LineSegment]) -> Vec<String> {
    segments.iter().map(format_segment).collect()
}

/// Title line followed by one line per segment.
pub fn render_listing(segments: &[LineSegment]) -> String {
    let mut out = format!("{LISTING_TITLE}:\n");
    for line in listing_lines(segments) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
