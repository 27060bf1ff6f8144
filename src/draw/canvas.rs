//! The raster operations every drawing backend provides.

use super::color::Color;
use super::segment::{Point, StrokeSegment};
use super::surface::SurfaceError;

/// Primitive pixel-mutating operations on a fixed-size raster.
///
/// [`Surface`](super::Surface) is the Cairo implementation. The input state
/// machine, text overlay and command dispatcher only talk to this trait, so
/// they can be driven against a recording canvas in tests.
pub trait Canvas {
    /// Raster dimensions in pixels; fixed for the canvas lifetime.
    fn dimensions(&self) -> (u32, u32);

    /// Strokes a round-capped line. Points outside the raster are clipped.
    fn draw_segment(&mut self, segment: &StrokeSegment);

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    /// Clears the raster, then paints `text` with its baseline starting at `anchor`.
    fn render_text(&mut self, text: &str, anchor: Point, color: Color, font_size: f64);

    /// Encodes the current pixels as PNG without mutating them.
    fn export_png(&self) -> Result<Vec<u8>, SurfaceError>;
}
