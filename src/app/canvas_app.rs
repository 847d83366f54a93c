//! Standalone canvas application that implements [`eframe::App`].
//!
//! [`CanvasApp`] is the presentation layer around a [`CanvasController`]:
//! it turns preset buttons into resize requests, pointer clicks into
//! canvas-relative click events, and repaints the segments and the listing
//! from a fresh snapshot every frame.

use std::sync::mpsc::Receiver;

use egui::{Color32, Stroke};

use crate::canvas::{Canvas, CanvasSnapshot};
use crate::config::{CanvasConfig, FeatureFlags, SizePreset, StrokeStyle};
use crate::controllers::CanvasController;
use crate::events::{CanvasEvent, EventFilter, EventKind, ExportMeta};
use crate::export;
use crate::geometry::CanvasSize;
use crate::listing;

/// Export target chosen from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Png,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Json => "json",
        }
    }
}

pub struct CanvasApp {
    /// Shared handle to the canvas. Other threads may hold clones.
    pub canvas: CanvasController,

    pub headline: Option<String>,
    pub presets: Vec<SizePreset>,
    pub stroke: StrokeStyle,
    pub features: FeatureFlags,

    /// Geometry notifications; drained every frame.
    changes: Receiver<CanvasEvent>,
    /// Last error shown in the status line (rejected resize, failed export).
    status: Option<String>,
}

impl CanvasApp {
    /// Build an app with a fresh canvas configured from `cfg`.
    pub fn new(cfg: &CanvasConfig) -> Self {
        let mut canvas = Canvas::new(cfg.initial_size);
        if let Err(e) = canvas.set_segment_length(cfg.segment_length) {
            log::warn!("{e}; keeping {}", canvas.segment_length());
        }
        canvas.set_event_controller(cfg.events.clone());
        Self::with_controller(CanvasController::new(canvas), cfg)
    }

    /// Build an app around an existing controller (e.g. one shared with a
    /// background producer).
    pub fn with_controller(canvas: CanvasController, cfg: &CanvasConfig) -> Self {
        let changes = canvas.subscribe(EventFilter::geometry());
        Self {
            canvas,
            headline: cfg.headline.clone(),
            presets: cfg.presets.clone(),
            stroke: cfg.stroke.clone(),
            features: cfg.features.clone(),
            changes,
            status: None,
        }
    }

    /// Returns `true` if the geometry changed since the last frame.
    fn drain_changes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(evt) = self.changes.try_recv() {
            log::trace!("{} ({} segment(s))", evt.kinds, evt.segment_count);
            changed = true;
        }
        changed
    }

    fn request_resize(&mut self, size: CanvasSize) {
        match self.canvas.on_resize_request(size.width, size.height) {
            Ok(()) => self.status = None,
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui, current: CanvasSize) {
        if let Some(h) = &self.headline {
            ui.heading(h);
        }
        ui.horizontal(|ui| {
            let mut requested = None;
            for preset in &self.presets {
                let active = preset.size == current;
                let label = format!(
                    "{} {}",
                    egui_phosphor::regular::FRAME_CORNERS,
                    preset.label
                );
                if ui
                    .selectable_label(active, label)
                    .on_hover_text(format!("Resize canvas to {}", preset.size))
                    .clicked()
                {
                    requested = Some(preset.size);
                }
            }
            if let Some(size) = requested {
                self.request_resize(size);
            }

            ui.separator();
            ui.label(format!("{current}"));

            if self.features.export {
                ui.separator();
                self.render_export_menu(ui);
            }
        });
        if let Some(msg) = &self.status {
            ui.colored_label(Color32::RED, msg.as_str());
        }
    }

    fn render_export_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button(format!("{} Export", egui_phosphor::regular::EXPORT), |ui| {
            if ui
                .button("PNG image")
                .on_hover_text("Rasterise the drawing at the current canvas size")
                .clicked()
            {
                ui.close();
                self.prompt_and_export(ExportFormat::Png);
            }
            if ui
                .button("JSON snapshot")
                .on_hover_text("Canvas size and segment coordinates")
                .clicked()
            {
                ui.close();
                self.prompt_and_export(ExportFormat::Json);
            }
        });
    }

    /// Show a save dialog and write the current snapshot.
    fn prompt_and_export(&mut self, format: ExportFormat) {
        let ext = format.extension();
        let Some(path) = rfd::FileDialog::new()
            .add_filter(ext.to_uppercase(), &[ext])
            .set_file_name(export::default_export_name(ext))
            .save_file()
        else {
            return;
        };

        let snapshot = self.canvas.snapshot();
        let result = match format {
            ExportFormat::Png => export::save_png(&path, &snapshot, &self.stroke),
            ExportFormat::Json => export::save_json(&path, &snapshot),
        };
        match result {
            Ok(()) => {
                self.status = None;
                let mut evt = CanvasEvent::new(EventKind::EXPORT, snapshot.size, snapshot.segments.len());
                evt.export = Some(ExportMeta {
                    format: ext.to_string(),
                    path: Some(path.display().to_string()),
                });
                self.canvas.events().emit(evt);
            }
            Err(e) => {
                log::warn!("failed to export {ext} to {:?}: {e}", path);
                self.status = Some(format!("Export failed: {e}"));
            }
        }
    }

    /// Paint the canvas and report a click in canvas-relative coordinates.
    fn render_canvas(&self, ui: &mut egui::Ui, snapshot: &CanvasSnapshot) -> Option<egui::Vec2> {
        let size = egui::vec2(snapshot.size.width as f32, snapshot.size.height as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, Color32::WHITE);
        if self.features.border {
            painter.rect_stroke(
                rect,
                0.0,
                Stroke::new(1.0, Color32::BLACK),
                egui::StrokeKind::Outside,
            );
        }

        let [r, g, b, a] = self.stroke.color_rgba;
        let stroke = Stroke::new(
            self.stroke.width,
            Color32::from_rgba_unmultiplied(r, g, b, a),
        );
        let clip = painter.with_clip_rect(rect);
        for s in &snapshot.segments {
            let p1 = rect.min + egui::vec2(s.p1.x as f32, s.p1.y as f32);
            let p2 = rect.min + egui::vec2(s.p2.x as f32, s.p2.y as f32);
            clip.line_segment([p1, p2], stroke);
        }

        if response.clicked() {
            return response.interact_pointer_pos().map(|pos| pos - rect.min);
        }
        None
    }

    fn render_listing(ui: &mut egui::Ui, snapshot: &CanvasSnapshot) {
        ui.strong(format!("{}:", listing::LISTING_TITLE));
        egui::ScrollArea::vertical()
            .id_salt("segment_listing")
            .auto_shrink([false, true])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in listing::listing_lines(&snapshot.segments) {
                    ui.monospace(line);
                }
            });
    }
}

impl eframe::App for CanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.drain_changes() {
            ctx.request_repaint();
        }
        let snapshot = self.canvas.snapshot();

        egui::TopBottomPanel::top("canvas_top_bar").show(ctx, |ui| {
            self.render_top_bar(ui, snapshot.size);
        });

        if self.features.listing {
            egui::TopBottomPanel::bottom("canvas_listing")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| {
                    Self::render_listing(ui, &snapshot);
                });
        }

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                clicked = self.render_canvas(ui, &snapshot);
            });
        });

        if let Some(at) = clicked {
            self.canvas.on_canvas_click(at.x as f64, at.y as f64);
        }

        // Pick up changes made through controller clones on other threads.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
