//! Top-level entry point for running the canvas as a native window.

use crate::config::CanvasConfig;
use crate::controllers::CanvasController;

use super::canvas_app::CanvasApp;

/// Launch the canvas application in a native window.
///
/// Blocks until the window is closed.
pub fn run_canvas(cfg: CanvasConfig) -> eframe::Result<()> {
    let app = CanvasApp::new(&cfg);
    run_app(app, cfg)
}

/// Launch the application around an existing controller, so other threads
/// can issue clicks and resizes while the window is open.
pub fn run_canvas_with_controller(canvas: CanvasController, cfg: CanvasConfig) -> eframe::Result<()> {
    let app = CanvasApp::with_controller(canvas, &cfg);
    run_app(app, cfg)
}

fn run_app(app: CanvasApp, mut cfg: CanvasConfig) -> eframe::Result<()> {
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    // Leave room around the largest canvas for the button bar and listing.
    if opts.viewport.inner_size.is_none() {
        let largest = cfg
            .presets
            .iter()
            .map(|p| p.size)
            .chain(std::iter::once(cfg.initial_size))
            .fold((0.0f64, 0.0f64), |(w, h), s| (w.max(s.width), h.max(s.height)));
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(largest.0 as f32 + 40.0, largest.1 as f32 + 260.0));
    }

    log::info!("starting canvas at {}", cfg.initial_size);
    eframe::run_native(
        &cfg.title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
