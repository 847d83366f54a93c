//! Error type shared by the canvas core, configuration loading and export.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CanvasError>;

#[derive(Debug, Error)]
pub enum CanvasError {
    /// A canvas size with a non-positive or non-finite dimension.
    #[error("invalid canvas size {width}x{height}: both dimensions must be positive and finite")]
    InvalidSize { width: f64, height: f64 },

    /// A click segment length that is non-positive or non-finite.
    #[error("invalid segment length {length}: must be positive and finite")]
    InvalidSegmentLength { length: f64 },

    /// Raster export larger than the supported pixel dimensions.
    #[error("canvas {width}x{height} is too large to rasterise (limit {limit} px per side)")]
    RasterTooLarge { width: f64, height: f64, limit: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CanvasError {
    #[must_use]
    pub fn invalid_size(width: f64, height: f64) -> Self {
        Self::InvalidSize { width, height }
    }
}
