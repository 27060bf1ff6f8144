//! Text overlay: live-rendered text that replaces the drawing.

use crate::draw::{Canvas, Point};
use crate::style::StyleContext;
use log::debug;

/// Default baseline anchor of the overlay text.
pub const DEFAULT_ANCHOR: Point = Point { x: 50.0, y: 100.0 };

/// Font pixel size derived from the stroke width.
///
/// Text size tracks the brush: twice the stroke width.
pub fn font_size_for_width(width: u32) -> f64 {
    width as f64 * 2.0
}

/// Re-renders the full text string on every text change.
///
/// Each update clears the raster first, so typing destroys any strokes and
/// any previously rendered text.
#[derive(Debug, Clone, Copy)]
pub struct TextOverlay {
    anchor: Point,
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR)
    }
}

impl TextOverlay {
    pub fn new(anchor: Point) -> Self {
        Self { anchor }
    }

    /// Clears `canvas` and paints `text` with the current style.
    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C, text: &str, style: &StyleContext) {
        let font_size = font_size_for_width(style.width());
        debug!(
            "Text overlay update ({} chars, {}px)",
            text.chars().count(),
            font_size
        );
        canvas.render_text(text, self.anchor, style.color(), font_size);
    }
}
