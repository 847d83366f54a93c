//! Shared handle for driving a canvas from outside the UI thread.
//!
//! [`CanvasController`] wraps a [`Canvas`] in a read/write lock. Clicks and
//! resizes hold the write lock for the whole rescale-and-replace, snapshots
//! hold the read lock, so a reader on any thread sees either the complete old
//! geometry or the complete new geometry.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::canvas::{Canvas, CanvasSnapshot};
use crate::error::Result;
use crate::events::{CanvasEvent, EventController, EventFilter};
use crate::geometry::{CanvasSize, LineSegment};

#[derive(Clone)]
pub struct CanvasController {
    inner: Arc<RwLock<Canvas>>,
    events: EventController,
}

impl CanvasController {
    /// Take ownership of `canvas`. If it has no event controller, one is attached.
    pub fn new(mut canvas: Canvas) -> Self {
        let events = match canvas.event_controller() {
            Some(ev) => ev.clone(),
            None => {
                let ev = EventController::new();
                canvas.set_event_controller(Some(ev.clone()));
                ev
            }
        };
        Self {
            inner: Arc::new(RwLock::new(canvas)),
            events,
        }
    }

    pub fn on_canvas_click(&self, x: f64, y: f64) -> LineSegment {
        self.write().on_canvas_click(x, y)
    }

    pub fn on_resize_request(&self, width: f64, height: f64) -> Result<()> {
        self.write().on_resize_request(width, height)
    }

    pub fn size(&self) -> CanvasSize {
        self.read().size()
    }

    pub fn segment_count(&self) -> usize {
        self.read().segments().len()
    }

    /// Consistent copy of size and segments.
    pub fn snapshot(&self) -> CanvasSnapshot {
        self.read().snapshot()
    }

    /// Run `f` against the canvas under the read lock.
    pub fn with_canvas<R>(&self, f: impl FnOnce(&Canvas) -> R) -> R {
        let guard = self.read();
        f(&*guard)
    }

    pub fn subscribe(&self, filter: EventFilter) -> Receiver<CanvasEvent> {
        self.events.subscribe(filter)
    }

    pub fn events(&self) -> &EventController {
        &self.events
    }

    // Mutations are single assignments, so a poisoned lock still guards
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Canvas> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Canvas> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn attaches_event_controller_when_missing() {
        let ctrl = CanvasController::default();
        let rx = ctrl.subscribe(EventFilter::geometry());
        ctrl.on_canvas_click(5.0, 5.0);
        assert!(rx.try_recv().unwrap().kinds.contains(EventKind::SEGMENT_APPENDED));
    }

    #[test]
    fn reuses_existing_event_controller() {
        let events = EventController::new();
        let rx = events.subscribe_all();
        let ctrl = CanvasController::new(Canvas::default().with_events(events));
        ctrl.on_resize_request(900.0, 600.0).unwrap();
        assert!(rx.try_recv().is_ok());
        assert_eq!(ctrl.size(), CanvasSize::new(900.0, 600.0).unwrap());
    }

    #[test]
    fn clones_share_state() {
        let a = CanvasController::default();
        let b = a.clone();
        a.on_canvas_click(1.0, 1.0);
        assert_eq!(b.segment_count(), 1);
        assert_eq!(b.with_canvas(|c| c.segments()[0].p2.x), 101.0);
    }
}
