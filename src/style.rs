//! Current drawing parameters shared by strokes and the text overlay.

use crate::draw::{Color, color::BLACK};
use log::{debug, warn};

/// Default stroke width in pixels.
pub const DEFAULT_WIDTH: u32 = 4;

/// Widest stroke accepted; text size is derived from it.
pub const MAX_WIDTH: u32 = 200;

/// Brush color and stroke width.
///
/// Writes are last-write-wins and only affect the next drawing operation;
/// segments already on the raster keep the values they were drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleContext {
    color: Color,
    width: u32,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new(BLACK, DEFAULT_WIDTH)
    }
}

impl StyleContext {
    pub fn new(color: Color, width: u32) -> Self {
        let mut style = Self { color, width: 1 };
        style.set_width(width);
        style
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Stroke width in pixels, within `1..=MAX_WIDTH`.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_color(&mut self, color: Color) {
        debug!("Brush color set to {}", color.to_hex());
        self.color = color;
    }

    /// Parses and applies a color picker value.
    ///
    /// Returns `false` and keeps the previous color when `value` is not a color.
    pub fn set_color_str(&mut self, value: &str) -> bool {
        match Color::parse(value) {
            Some(color) => {
                self.set_color(color);
                true
            }
            None => {
                warn!("Ignoring unrecognized color '{}'", value);
                false
            }
        }
    }

    /// Sets the stroke width, clamped to `1..=MAX_WIDTH`.
    pub fn set_width(&mut self, width: u32) {
        if !(1..=MAX_WIDTH).contains(&width) {
            warn!(
                "Stroke width {} out of range, clamping to 1-{}",
                width, MAX_WIDTH
            );
        }
        self.width = width.clamp(1, MAX_WIDTH);
        debug!("Stroke width set to {}", self.width);
    }
}
