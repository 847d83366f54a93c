//! linecanvas crate root: re-exports and module wiring.
//!
//! A click-to-draw canvas. Every click appends a fixed-length horizontal
//! segment; switching between preset canvas sizes rescales all stored
//! segments so they keep their position relative to the canvas extent.
//!
//! - `geometry`: points, segments and canvas sizes
//! - `store`: append-only segment storage
//! - `rescale`: per-axis remapping between canvas sizes
//! - `click`: click-to-segment policy
//! - `canvas`: owner of the store and size, the only mutation surface
//! - `events`: change notifications for renderers
//! - `controllers`: thread-safe handle to a canvas
//! - `listing` / `export`: textual listing, PNG and JSON output
//! - `config`: runtime and YAML configuration
//! - `app`: egui/eframe front-end

pub mod app;
pub mod canvas;
pub mod click;
pub mod config;
pub mod controllers;
pub mod error;
pub mod events;
pub mod export;
pub mod geometry;
pub mod listing;
pub mod rescale;
pub mod store;

// Public re-exports for a compact external API
pub use app::{run_canvas, run_canvas_with_controller, CanvasApp};
pub use canvas::{Canvas, CanvasSnapshot};
pub use click::{segment_from_click, DEFAULT_SEGMENT_LENGTH};
pub use config::{CanvasConfig, SizePreset, StrokeStyle};
pub use controllers::CanvasController;
pub use error::{CanvasError, Result};
pub use events::{CanvasEvent, EventController, EventFilter, EventKind};
pub use geometry::{CanvasSize, LineSegment, Point};
pub use rescale::{rescale, ScaleFactors};
pub use store::LineStore;
