//! Configuration type definitions.

use super::enums::OverlapPolicy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "SKETCHPAD_API_KEY";

/// Raster dimensions, fixed for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Surface width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Surface height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Brush defaults applied when a session starts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial brush color: `#rrggbb`, `#rgb` or a palette name (red, green, blue,
    /// yellow, orange, pink, white, black)
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Initial stroke width in pixels (valid range: 1 - 200)
    #[serde(default = "default_width")]
    pub default_width: u32,

    /// Font family used for the text overlay
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style ("normal", "italic" or "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Text overlay placement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// X coordinate of the text baseline start
    #[serde(default = "default_anchor_x")]
    pub anchor_x: f64,

    /// Y coordinate of the text baseline
    #[serde(default = "default_anchor_y")]
    pub anchor_y: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            anchor_x: default_anchor_x(),
            anchor_y: default_anchor_y(),
        }
    }
}

/// Recognition service settings.
#[derive(Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecognitionConfig {
    /// Service URL receiving the POST request
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer credential; falls back to the SKETCHPAD_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds; unset leaves the transport default in place
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Handling of overlapping recognize commands
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: None,
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

impl RecognitionConfig {
    /// API key from the config file, else from the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// Keeps the credential out of logs
impl fmt::Debug for RecognitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognitionConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_deref().map(mask_secret))
            .field("timeout_secs", &self.timeout_secs)
            .field("overlap_policy", &self.overlap_policy)
            .finish()
    }
}

/// Masks all but the first four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

/// Where the save command writes `drawing.png`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output directory (`~/` is expanded)
    #[serde(default = "default_export_directory")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

pub(crate) fn default_color() -> String {
    "#000000".to_string()
}

fn default_width() -> u32 {
    crate::style::DEFAULT_WIDTH
}

fn default_font_family() -> String {
    "Arial".to_string()
}

pub(crate) fn default_font_weight() -> String {
    "normal".to_string()
}

pub(crate) fn default_font_style() -> String {
    "normal".to_string()
}

fn default_anchor_x() -> f64 {
    crate::text::DEFAULT_ANCHOR.x
}

fn default_anchor_y() -> f64 {
    crate::text::DEFAULT_ANCHOR.y
}

pub(crate) fn default_endpoint() -> String {
    "https://api.gemini.ai/analyze".to_string()
}

fn default_export_directory() -> String {
    ".".to_string()
}
