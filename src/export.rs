//! Write-only export of the current drawing: PNG raster and JSON snapshot.
//!
//! Nothing written here is ever loaded back into a canvas.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::canvas::CanvasSnapshot;
use crate::config::StrokeStyle;
use crate::error::{CanvasError, Result};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Largest raster side, in pixels, that [`rasterize`] will allocate.
pub const MAX_RASTER_SIDE: u32 = 16_384;

/// Default file name for an export, e.g. `canvas_20260118_143005.png`.
pub fn default_export_name(extension: &str) -> String {
    format!(
        "canvas_{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}

/// Render the snapshot onto a white image of the canvas dimensions.
///
/// Segments extending past the canvas are clipped at the image border.
/// Fails with [`CanvasError::RasterTooLarge`] when either side exceeds
/// [`MAX_RASTER_SIDE`] or the pixel buffer would not fit in memory.
pub fn rasterize(snapshot: &CanvasSnapshot, stroke: &StrokeStyle) -> Result<RgbaImage> {
    let (w, h) = raster_dimensions(snapshot.size.width, snapshot.size.height)?;
    let mut img = RgbaImage::from_pixel(w, h, BACKGROUND);
    let color = Rgba(stroke.color_rgba);
    let brush = stroke.width.round().max(1.0).min(MAX_RASTER_SIDE as f32) as i32;
    let margin = f64::from(brush);
    let bounds = (-margin, -margin, f64::from(w) + margin, f64::from(h) + margin);
    for s in &snapshot.segments {
        let Some([x0, y0, x1, y1]) = clip_to(bounds, s.coords()) else {
            continue;
        };
        draw_line(
            &mut img,
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
            brush,
            color,
        );
    }
    Ok(img)
}

fn raster_dimensions(width: f64, height: f64) -> Result<(u32, u32)> {
    let too_large = || CanvasError::RasterTooLarge {
        width,
        height,
        limit: MAX_RASTER_SIDE,
    };
    let side = |v: f64| {
        let v = v.round().max(1.0);
        if v.is_finite() && v <= f64::from(MAX_RASTER_SIDE) {
            Ok(v as u32)
        } else {
            Err(too_large())
        }
    };
    let (w, h) = (side(width)?, side(height)?);
    (w as usize)
        .checked_mul(h as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(too_large)?;
    Ok((w, h))
}

// Liang-Barsky against `(xmin, ymin, xmax, ymax)`. Keeps every endpoint small
// enough for the integer stepper; non-finite segments are dropped.
fn clip_to(bounds: (f64, f64, f64, f64), [x0, y0, x1, y1]: [f64; 4]) -> Option<[f64; 4]> {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (xmin, ymin, xmax, ymax) = bounds;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0 - xmin), (dx, xmax - x0), (-dy, y0 - ymin), (dy, ymax - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }
    Some([x0 + t0 * dx, y0 + t0 * dy, x0 + t1 * dx, y0 + t1 * dy])
}

pub fn save_png(path: &Path, snapshot: &CanvasSnapshot, stroke: &StrokeStyle) -> Result<()> {
    rasterize(snapshot, stroke)?.save(path)?;
    log::info!("saved canvas PNG to {:?}", path);
    Ok(())
}

pub fn snapshot_to_json(snapshot: &CanvasSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn save_json(path: &Path, snapshot: &CanvasSnapshot) -> Result<()> {
    std::fs::write(path, snapshot_to_json(snapshot)?)?;
    log::info!("saved canvas JSON to {:?}", path);
    Ok(())
}

// Bresenham, stamping a `brush`-sized square at every step.
fn draw_line(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, brush: i32, color: Rgba<u8>) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }
    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let mut err = dx / 2;
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut y = y0;
    for x in x0..=x1 {
        if steep {
            stamp(img, y, x, brush, color);
        } else {
            stamp(img, x, y, brush, color);
        }
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }
}

fn stamp(img: &mut RgbaImage, cx: i32, cy: i32, brush: i32, color: Rgba<u8>) {
    let half = (brush - 1) / 2;
    for oy in -half..(brush - half) {
        for ox in -half..(brush - half) {
            let (x, y) = (cx + ox, cy + oy);
            if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
