//! Change notifications for the canvas.
//!
//! The canvas emits a [`CanvasEvent`] after every successful mutation. Each
//! event carries a set of [`EventKind`] flags so that one occurrence can match
//! several categories (an appended segment is *also* a `GEOMETRY_CHANGED`).
//!
//! Renderers subscribe with an [`EventFilter`] via [`EventController`] and
//! receive events on an `mpsc` channel. The filter is an OR mask: an event is
//! delivered when `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

use crate::geometry::{CanvasSize, LineSegment, Point};

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// A click was received from the input layer.
    pub const CLICK: Self = Self(1 << 0);
    /// A segment was appended to the store.
    pub const SEGMENT_APPENDED: Self = Self(1 << 1);
    /// The authoritative canvas size changed.
    pub const RESIZED: Self = Self(1 << 2);
    /// Stored segments were replaced by their rescaled counterparts.
    pub const RESCALED: Self = Self(1 << 3);
    /// Anything a renderer draws from changed; redraw from scratch.
    pub const GEOMETRY_CHANGED: Self = Self(1 << 4);
    /// A resize request was rejected (invalid dimensions).
    pub const RESIZE_REJECTED: Self = Self(1 << 5);
    /// The drawing was exported (PNG or JSON).
    pub const EXPORT: Self = Self(1 << 6);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// At least one bit in common.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::CLICK, "CLICK"),
            (EventKind::SEGMENT_APPENDED, "SEGMENT_APPENDED"),
            (EventKind::RESIZED, "RESIZED"),
            (EventKind::RESCALED, "RESCALED"),
            (EventKind::GEOMETRY_CHANGED, "GEOMETRY_CHANGED"),
            (EventKind::RESIZE_REJECTED, "RESIZE_REJECTED"),
            (EventKind::EXPORT, "EXPORT"),
        ];

        let mut names = Vec::new();
        let mut known_bits = 0u32;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// A click and the segment it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppendMeta {
    /// Canvas-relative click position.
    pub click: Point,
    /// The segment that was appended.
    pub segment: LineSegment,
    /// Index of the new segment in the store.
    pub index: usize,
}

/// An accepted or rejected resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeMeta {
    pub old_size: CanvasSize,
    /// Requested size. Equals the new authoritative size unless rejected.
    pub new_size: CanvasSize,
    /// Number of segments that were rescaled.
    pub rescaled: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportMeta {
    /// "png" or "json".
    pub format: String,
    pub path: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// CanvasEvent
// ─────────────────────────────────────────────────────────────────────────────

/// A change notification emitted by the canvas.
#[derive(Debug, Clone)]
pub struct CanvasEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created. Set on emit.
    pub timestamp: f64,
    /// Canvas size after the change.
    pub size: CanvasSize,
    /// Number of stored segments after the change.
    pub segment_count: usize,

    pub append: Option<AppendMeta>,
    pub resize: Option<ResizeMeta>,
    pub export: Option<ExportMeta>,
}

impl CanvasEvent {
    pub fn new(kinds: EventKind, size: CanvasSize, segment_count: usize) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            size,
            segment_count,
            append: None,
            resize: None,
            export: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    /// Only redraw-relevant events.
    pub const fn geometry() -> Self {
        Self::only(EventKind::GEOMETRY_CHANGED)
    }

    #[inline]
    pub fn matches(&self, event: &CanvasEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<CanvasEvent>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

/// Collects subscribers and distributes canvas events to them.
///
/// Cloning yields another handle to the same subscriber list.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events matching `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<CanvasEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<CanvasEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to every matching subscriber.
    ///
    /// Subscribers whose receiver was dropped are pruned when an event matching
    /// their filter fails to send.
    pub fn emit(&self, mut event: CanvasEvent) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        log::trace!("emit {} to {} subscriber(s)", event.kinds, inner.subscribers.len());
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventController")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kinds: EventKind) -> CanvasEvent {
        CanvasEvent::new(kinds, CanvasSize::DEFAULT, 0)
    }

    #[test]
    fn event_kind_union_and_intersection() {
        let combined = EventKind::SEGMENT_APPENDED | EventKind::GEOMETRY_CHANGED;
        assert!(combined.contains(EventKind::SEGMENT_APPENDED));
        assert!(combined.contains(EventKind::GEOMETRY_CHANGED));
        assert!(!combined.intersects(EventKind::RESIZED));
        assert!(EventKind::ALL.contains(combined));
    }

    #[test]
    fn event_kinds_do_not_overlap() {
        let all = [
            EventKind::CLICK,
            EventKind::SEGMENT_APPENDED,
            EventKind::RESIZED,
            EventKind::RESCALED,
            EventKind::GEOMETRY_CHANGED,
            EventKind::RESIZE_REJECTED,
            EventKind::EXPORT,
        ];
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    assert!(!a.intersects(*b), "bits {} and {} overlap", i, j);
                }
            }
        }
    }

    #[test]
    fn event_kind_display() {
        assert_eq!(format!("{}", EventKind::RESIZED), "RESIZED");
        assert_eq!(
            format!("{}", EventKind::RESIZED | EventKind::RESCALED),
            "RESIZED|RESCALED"
        );
        assert_eq!(format!("{}", EventKind::ALL), "ALL");
        assert_eq!(format!("{}", EventKind(0)), "EMPTY");
        assert!(format!("{}", EventKind(1 << 31)).starts_with("0x"));
    }

    #[test]
    fn filtered_delivery() {
        let ctrl = EventController::new();
        let rx_all = ctrl.subscribe_all();
        let rx_geo = ctrl.subscribe(EventFilter::geometry());
        let rx_export = ctrl.subscribe(EventFilter::only(EventKind::EXPORT));

        ctrl.emit(event(EventKind::SEGMENT_APPENDED | EventKind::GEOMETRY_CHANGED));

        assert!(rx_all.try_recv().is_ok());
        assert!(rx_geo.try_recv().is_ok());
        assert!(rx_export.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let ctrl = EventController::new();
        let rx1 = ctrl.subscribe_all();
        let rx2 = ctrl.subscribe_all();
        drop(rx1);

        ctrl.emit(event(EventKind::RESIZED));
        assert!(rx2.try_recv().is_ok());
        assert_eq!(ctrl.subscriber_count(), 1);
    }

    #[test]
    fn timestamp_set_on_emit() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe_all();
        std::thread::sleep(std::time::Duration::from_millis(5));
        ctrl.emit(event(EventKind::CLICK));
        assert!(rx.try_recv().unwrap().timestamp > 0.0);
    }
}
