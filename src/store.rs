//! Ordered, append-only storage of line segments.

use crate::geometry::LineSegment;

/// Segments in insertion order. Render and listing order follow this order.
///
/// The store never validates geometry: degenerate and out-of-bounds segments
/// are kept as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStore {
    segments: Vec<LineSegment>,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `segment` as the new last element.
    pub fn append(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    /// Current contents in insertion order.
    pub fn all_segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Swap in a complete new set of segments.
    ///
    /// The previous contents are dropped in the same assignment, so a reader
    /// holding the owner sees either the old or the new set.
    pub(crate) fn replace_all(&mut self, segments: Vec<LineSegment>) {
        self.segments = segments;
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineSegment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a LineStore {
    type Item = &'a LineSegment;
    type IntoIter = std::slice::Iter<'a, LineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
