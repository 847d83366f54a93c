//! egui/eframe front-end.
//!
//! | Sub-module     | Responsibility |
//! | -------------- | -------------- |
//! | [`canvas_app`] | [`CanvasApp`]: buttons, canvas painting, click handling, listing, export |
//! | [`run`]        | [`run_canvas()`] entry points |

mod canvas_app;
mod run;

pub use canvas_app::CanvasApp;
pub use run::{run_canvas, run_canvas_with_controller};
