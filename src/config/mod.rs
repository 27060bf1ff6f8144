//! Configuration file support for sketchpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchpad/config.toml`. Settings include the canvas size, brush
//! defaults, text placement, the recognition service and the export directory.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::OverlapPolicy;
pub use types::{
    API_KEY_ENV, CanvasConfig, DrawingConfig, ExportConfig, RecognitionConfig, TextConfig,
};

use crate::draw::{Color, FontDescriptor, Point};
use crate::style::{MAX_WIDTH, StyleContext};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 800
/// height = 600
///
/// [drawing]
/// default_color = "#000000"
/// default_width = 4
///
/// [recognition]
/// endpoint = "https://api.gemini.ai/analyze"
/// overlap_policy = "last-resolved"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Raster dimensions
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Brush defaults (color, width, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Text overlay placement
    #[serde(default)]
    pub text: TextConfig,

    /// Recognition service
    #[serde(default)]
    pub recognition: RecognitionConfig,

    /// Save command output
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    /// - `drawing.default_width`: 1 - 200
    /// - `drawing.default_color`: must parse, otherwise black
    /// - `drawing.font_weight`: named weight or 100 - 900, otherwise normal
    /// - `drawing.font_style`: normal, italic or oblique
    /// - `recognition.endpoint`: must be an http(s) URL, otherwise the default service
    fn validate_and_clamp(&mut self) {
        if !(1..=8192).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-8192 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(1, 8192);
        }

        if !(1..=8192).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-8192 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(1, 8192);
        }

        if !(1..=MAX_WIDTH).contains(&self.drawing.default_width) {
            log::warn!(
                "Invalid default_width {}, clamping to 1-{} range",
                self.drawing.default_width,
                MAX_WIDTH
            );
            self.drawing.default_width = self.drawing.default_width.clamp(1, MAX_WIDTH);
        }

        if Color::parse(&self.drawing.default_color).is_none() {
            log::warn!(
                "Invalid default_color '{}', falling back to black",
                self.drawing.default_color
            );
            self.drawing.default_color = types::default_color();
        }

        if self.drawing.font_family.trim().is_empty() {
            log::warn!("Empty font_family, falling back to 'Arial'");
            self.drawing.font_family = "Arial".to_string();
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = types::default_font_weight();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = types::default_font_style();
        }

        let endpoint_ok = url::Url::parse(&self.recognition.endpoint)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
        if !endpoint_ok {
            log::warn!(
                "Invalid recognition endpoint '{}', falling back to default",
                self.recognition.endpoint
            );
            self.recognition.endpoint = types::default_endpoint();
        }

        if self.recognition.timeout_secs == Some(0) {
            log::warn!("recognition.timeout_secs = 0 disables the request; ignoring");
            self.recognition.timeout_secs = None;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from `path` (or the default location), or returns
    /// defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            let mut config = Self::default();
            config.validate_and_clamp();
            return Ok(config);
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(input)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Initial brush for a new session.
    pub fn initial_style(&self) -> StyleContext {
        let color = Color::parse(&self.drawing.default_color).unwrap_or(crate::draw::BLACK);
        StyleContext::new(color, self.drawing.default_width)
    }

    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.drawing.font_family.clone(),
            self.drawing.font_weight.clone(),
            self.drawing.font_style.clone(),
        )
    }

    pub fn text_anchor(&self) -> Point {
        Point::new(self.text.anchor_x, self.text.anchor_y)
    }
}
