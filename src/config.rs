//! Configuration for the canvas application.
//!
//! [`CanvasConfig`] is the runtime configuration handed to
//! [`run_canvas`](crate::app::run_canvas). Its serialisable part,
//! [`CanvasConfigFile`], can be loaded from YAML; every field is optional and
//! falls back to the defaults below.
//!
//! ```yaml
//! title: My canvas
//! initial_size: { width: 1200, height: 800 }
//! segment_length: 100
//! presets:
//!   - { label: Small, size: { width: 300, height: 200 } }
//!   - { label: Medium, size: { width: 600, height: 400 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::check_segment_length;
use crate::click::DEFAULT_SEGMENT_LENGTH;
use crate::error::{CanvasError, Result};
use crate::events::EventController;
use crate::geometry::CanvasSize;

// ─────────────────────────────────────────────────────────────────────────────
// Presets
// ─────────────────────────────────────────────────────────────────────────────

/// A canvas size offered as a button.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizePreset {
    pub label: String,
    pub size: CanvasSize,
}

impl SizePreset {
    pub fn new(label: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            label: label.into(),
            size: CanvasSize { width, height },
        }
    }

    /// Small 300x200, Medium 600x400, Large 900x600.
    pub fn defaults() -> Vec<SizePreset> {
        vec![
            SizePreset::new("Small", 300.0, 200.0),
            SizePreset::new("Medium", 600.0, 400.0),
            SizePreset::new("Large", 900.0, 600.0),
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Appearance
// ─────────────────────────────────────────────────────────────────────────────

/// How segments are stroked on screen and in PNG exports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Line width in pixels.
    pub width: f32,
    pub color_rgba: [u8; 4],
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color_rgba: [0, 0, 0, 255],
        }
    }
}

/// Toggle individual UI elements. All enabled by default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Show the textual list of segments.
    pub listing: bool,
    /// Show the export menu.
    pub export: bool,
    /// Draw a border around the canvas.
    pub border: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            listing: true,
            export: true,
            border: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CanvasConfigFile
// ─────────────────────────────────────────────────────────────────────────────

/// Serialisable subset of [`CanvasConfig`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfigFile {
    pub title: String,
    pub headline: Option<String>,
    pub initial_size: CanvasSize,
    pub presets: Vec<SizePreset>,
    pub segment_length: f64,
    pub stroke: StrokeStyle,
    pub features: FeatureFlags,
}

impl Default for CanvasConfigFile {
    fn default() -> Self {
        Self {
            title: "Line Canvas".to_string(),
            headline: None,
            initial_size: CanvasSize::DEFAULT,
            presets: SizePreset::defaults(),
            segment_length: DEFAULT_SEGMENT_LENGTH,
            stroke: StrokeStyle::default(),
            features: FeatureFlags::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CanvasConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `initial_size`   | Size of the canvas when the window opens |
/// | `presets`        | One resize button per entry |
/// | `segment_length` | Length of the segment a click draws |
/// | `stroke`         | Line width and colour |
/// | `features`       | Toggle listing, export and border |
/// | `events`         | Optional subscriber hub for change notifications |
#[derive(Clone)]
pub struct CanvasConfig {
    /// Native window title.
    pub title: String,
    /// Optional headline rendered above the buttons.
    pub headline: Option<String>,
    pub initial_size: CanvasSize,
    pub presets: Vec<SizePreset>,
    pub segment_length: f64,
    pub stroke: StrokeStyle,
    pub features: FeatureFlags,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
    /// Attach to observe canvas changes from outside the UI.
    pub events: Option<EventController>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let file = CanvasConfigFile::default();
        Self {
            title: file.title,
            headline: file.headline,
            initial_size: file.initial_size,
            presets: file.presets,
            segment_length: file.segment_length,
            stroke: file.stroke,
            features: file.features,
            native_options: None,
            events: None,
        }
    }
}

impl CanvasConfig {
    /// Validate a file configuration and turn it into a runtime one.
    ///
    /// Fails if the initial size or any preset has a non-positive or
    /// non-finite dimension, or if the segment length is not a positive
    /// finite number.
    pub fn from_file(file: CanvasConfigFile) -> Result<Self> {
        check_size(file.initial_size)?;
        check_segment_length(file.segment_length)?;
        for preset in &file.presets {
            check_size(preset.size)?;
        }
        Ok(Self {
            title: file.title,
            headline: file.headline,
            initial_size: file.initial_size,
            presets: file.presets,
            segment_length: file.segment_length,
            stroke: file.stroke,
            features: file.features,
            native_options: None,
            events: None,
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: CanvasConfigFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)?;
        let cfg = Self::from_yaml_str(&txt)?;
        log::info!("loaded configuration from {:?}", path);
        Ok(cfg)
    }

    /// The serialisable part of this configuration.
    pub fn to_file(&self) -> CanvasConfigFile {
        CanvasConfigFile {
            title: self.title.clone(),
            headline: self.headline.clone(),
            initial_size: self.initial_size,
            presets: self.presets.clone(),
            segment_length: self.segment_length,
            stroke: self.stroke.clone(),
            features: self.features.clone(),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_file())?)
    }
}

fn check_size(size: CanvasSize) -> Result<()> {
    if size.is_valid() {
        Ok(())
    } else {
        Err(CanvasError::invalid_size(size.width, size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_preset_buttons() {
        let cfg = CanvasConfig::default();
        assert_eq!(cfg.initial_size, CanvasSize::DEFAULT);
        let sizes: Vec<(f64, f64)> = cfg
            .presets
            .iter()
            .map(|p| (p.size.width, p.size.height))
            .collect();
        assert_eq!(sizes, vec![(300.0, 200.0), (600.0, 400.0), (900.0, 600.0)]);
        assert_eq!(cfg.segment_length, 100.0);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg = CanvasConfig::from_yaml_str("title: Sketch\nsegment_length: 40\n").unwrap();
        assert_eq!(cfg.title, "Sketch");
        assert_eq!(cfg.segment_length, 40.0);
        assert_eq!(cfg.presets, SizePreset::defaults());
        assert!(cfg.features.listing);
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        let err = CanvasConfig::from_yaml_str("initial_size: { width: 0, height: 800 }\n");
        assert!(matches!(err, Err(CanvasError::InvalidSize { .. })));

        let err = CanvasConfig::from_yaml_str(
            "presets:\n  - { label: Bad, size: { width: 10, height: -4 } }\n",
        );
        assert!(matches!(err, Err(CanvasError::InvalidSize { .. })));
    }

    #[test]
    fn invalid_segment_length_is_rejected() {
        for yaml in [
            "segment_length: .nan\n",
            "segment_length: .inf\n",
            "segment_length: -5\n",
            "segment_length: 0\n",
        ] {
            let err = CanvasConfig::from_yaml_str(yaml);
            assert!(
                matches!(err, Err(CanvasError::InvalidSegmentLength { .. })),
                "accepted {yaml:?}"
            );
        }
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = CanvasConfig::from_yaml_str("initial_size: wide\n");
        assert!(matches!(err, Err(CanvasError::Yaml(_))));
    }

    #[test]
    fn yaml_round_trip_preserves_presets() {
        let mut cfg = CanvasConfig::default();
        cfg.presets.push(SizePreset::new("Huge", 1600.0, 1000.0));
        let yaml = cfg.to_yaml_string().unwrap();
        let back = CanvasConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back.presets, cfg.presets);
    }
}
