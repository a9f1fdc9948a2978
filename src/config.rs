//! Tunables for each stage of the pipeline.
//!
//! Every struct deserializes with defaults for missing fields, so a config file only
//! needs to name the values it changes.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extraction thresholds and window sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Matches must score strictly above this to be kept.
    pub min_confidence: f64,
    /// Number of neighbouring sentences on each side included as context.
    pub context_window: usize,
    /// Number of statements listed in the summary's top section.
    pub summary_top: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            context_window: 2,
            summary_top: 3,
        }
    }
}

/// Raster geometry for rendered flowcharts. Node positions are in world units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub pixels_per_unit: u32,
    /// Horizontal extent of the canvas, centred on the flowchart axis.
    pub width_units: f64,
    /// Blank border above the first node and below the last one.
    pub margin_units: f64,
    /// Upper bound on the image height. Taller charts are drawn at a smaller scale.
    pub max_height_px: u32,
    /// TrueType/OpenType font for the title and labels; the bundled sans font when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 60,
            width_units: 10.0,
            margin_units: 1.0,
            max_height_px: 4000,
            font_path: None,
        }
    }
}

/// Top-level configuration for the workflow coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Directory receiving every artifact a workflow produces.
    pub output_dir: PathBuf,
    pub extractor: ExtractorConfig,
    pub render: RenderConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            extractor: ExtractorConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl CoordinatorConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}
