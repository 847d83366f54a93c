//! The canvas: single owner of the line store and the authoritative size.
//!
//! [`Canvas::on_canvas_click`] and [`Canvas::on_resize_request`] are the only
//! ways to mutate geometry. A resize rescales the whole store and installs the
//! result before the new size is recorded, so every stored coordinate is
//! always relative to [`Canvas::size`].

use serde::{Deserialize, Serialize};

use crate::click::{segment_from_click_with_length, DEFAULT_SEGMENT_LENGTH};
use crate::error::{CanvasError, Result};
use crate::events::{AppendMeta, CanvasEvent, EventController, EventKind, ResizeMeta};
use crate::geometry::{CanvasSize, LineSegment, Point};
use crate::rescale::rescale;
use crate::store::LineStore;

/// Owned copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub size: CanvasSize,
    pub segments: Vec<LineSegment>,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    store: LineStore,
    size: CanvasSize,
    segment_length: f64,
    events: Option<EventController>,
}

impl Canvas {
    /// Empty canvas of the given size.
    pub fn new(size: CanvasSize) -> Self {
        Self {
            store: LineStore::new(),
            size,
            segment_length: DEFAULT_SEGMENT_LENGTH,
            events: None,
        }
    }

    /// Empty canvas after validating the initial size.
    pub fn with_size(width: f64, height: f64) -> Result<Self> {
        Ok(Self::new(CanvasSize::new(width, height)?))
    }

    /// Length of the segment a click produces, in canvas units.
    pub fn with_segment_length(mut self, length: f64) -> Result<Self> {
        self.set_segment_length(length)?;
        Ok(self)
    }

    /// Rejects non-positive and non-finite lengths, keeping the current one.
    pub fn set_segment_length(&mut self, length: f64) -> Result<()> {
        check_segment_length(length)?;
        self.segment_length = length;
        Ok(())
    }

    /// Attach an event controller; notifications are emitted after each change.
    pub fn with_events(mut self, events: EventController) -> Self {
        self.events = Some(events);
        self
    }

    pub fn set_event_controller(&mut self, events: Option<EventController>) {
        self.events = events;
    }

    pub fn event_controller(&self) -> Option<&EventController> {
        self.events.as_ref()
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    /// Stored segments in insertion order.
    pub fn segments(&self) -> &[LineSegment] {
        self.store.all_segments()
    }

    pub fn store(&self) -> &LineStore {
        &self.store
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            size: self.size,
            segments: self.store.all_segments().to_vec(),
        }
    }

    /// Append the segment produced by a click at canvas-relative `(x, y)`.
    ///
    /// Accepted unconditionally; returns the stored segment.
    pub fn on_canvas_click(&mut self, x: f64, y: f64) -> LineSegment {
        let click = Point::new(x, y);
        let segment = segment_from_click_with_length(click, self.segment_length);
        self.store.append(segment);
        let index = self.store.len() - 1;
        log::debug!("segment #{index} appended at ({x}, {y}) on {}", self.size);

        let mut evt = self.event(EventKind::CLICK | EventKind::SEGMENT_APPENDED | EventKind::GEOMETRY_CHANGED);
        evt.append = Some(AppendMeta {
            click,
            segment,
            index,
        });
        self.emit(evt);
        segment
    }

    /// Resize the canvas to `(width, height)`, rescaling every stored segment.
    ///
    /// Rejects non-positive or non-finite dimensions without touching the store
    /// or the size.
    pub fn on_resize_request(&mut self, width: f64, height: f64) -> Result<()> {
        let old_size = self.size;
        let new_size = match CanvasSize::new(width, height) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("resize to {width}x{height} rejected: {e}");
                let mut evt = self.event(EventKind::RESIZE_REJECTED);
                evt.resize = Some(ResizeMeta {
                    old_size,
                    new_size: CanvasSize { width, height },
                    rescaled: 0,
                });
                self.emit(evt);
                return Err(e);
            }
        };

        let rescaled = rescale(self.store.all_segments(), old_size, new_size);
        let count = rescaled.len();
        self.store.replace_all(rescaled);
        self.size = new_size;
        log::debug!("canvas resized {old_size} -> {new_size}, {count} segment(s) rescaled");

        let mut evt = self.event(EventKind::RESIZED | EventKind::RESCALED | EventKind::GEOMETRY_CHANGED);
        evt.resize = Some(ResizeMeta {
            old_size,
            new_size,
            rescaled: count,
        });
        self.emit(evt);
        Ok(())
    }

    /// [`on_resize_request`](Self::on_resize_request) taking a [`CanvasSize`].
    pub fn resize_to(&mut self, size: CanvasSize) -> Result<()> {
        self.on_resize_request(size.width, size.height)
    }

    fn event(&self, kinds: EventKind) -> CanvasEvent {
        CanvasEvent::new(kinds, self.size, self.store.len())
    }

    fn emit(&self, evt: CanvasEvent) {
        if let Some(events) = &self.events {
            events.emit(evt);
        }
    }
}

pub(crate) fn check_segment_length(length: f64) -> Result<()> {
    if length.is_finite() && length > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidSegmentLength { length })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasSize::DEFAULT)
    }
}
