//! Cairo-backed raster surface.

use super::canvas::Canvas;
use super::color::Color;
use super::font::FontDescriptor;
use super::segment::{Point, StrokeSegment};
use cairo::{Context, Format, ImageSurface};
use log::{trace, warn};
use thiserror::Error;

/// Errors raised while creating or encoding a surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),
}

/// The drawing surface: a fixed-size ARGB32 raster that owns all pixels.
///
/// Every mutation goes through the [`Canvas`] implementation below. A fresh
/// Cairo context is created per operation so the surface stays exclusively
/// owned between calls, which keeps [`Surface::alpha_at`] and friends able to
/// borrow the pixel data.
pub struct Surface {
    surface: ImageSurface,
    width: u32,
    height: u32,
    font: FontDescriptor,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("font", &self.font)
            .finish()
    }
}

impl Surface {
    /// Allocates a blank, fully transparent raster.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Self::with_font(width, height, FontDescriptor::default())
    }

    /// Allocates a blank raster that renders text with `font`.
    pub fn with_font(width: u32, height: u32, font: FontDescriptor) -> Result<Self, SurfaceError> {
        let invalid = || SurfaceError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let w = i32::try_from(width).map_err(|_| invalid())?;
        let h = i32::try_from(height).map_err(|_| invalid())?;

        let surface = ImageSurface::create(Format::ARgb32, w, h)?;
        Ok(Self {
            surface,
            width,
            height,
            font,
        })
    }

    /// Font used by [`Canvas::render_text`].
    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    fn context(&self) -> Option<Context> {
        match Context::new(&self.surface) {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                warn!("Failed to create drawing context: {}", err);
                None
            }
        }
    }

    /// Alpha channel of the pixel at (x, y), or `None` when out of bounds.
    pub fn alpha_at(&mut self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = match self.surface.data() {
            Ok(data) => data,
            Err(err) => {
                warn!("Surface pixels unavailable: {}", err);
                return None;
            }
        };
        let offset = y as usize * stride + x as usize * 4;
        let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
        // ARGB32 is stored as a native-endian u32 with alpha in the top byte
        Some((u32::from_ne_bytes(bytes) >> 24) as u8)
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&mut self) -> bool {
        self.surface.flush();
        match self.surface.data() {
            Ok(data) => data.iter().all(|byte| *byte == 0),
            Err(err) => {
                warn!("Surface pixels unavailable: {}", err);
                false
            }
        }
    }
}

impl Canvas for Surface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_segment(&mut self, segment: &StrokeSegment) {
        let Some(ctx) = self.context() else {
            return;
        };
        let color = segment.color;

        ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        ctx.set_line_width(segment.width);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.set_line_join(cairo::LineJoin::Round);

        ctx.move_to(segment.from.x, segment.from.y);
        ctx.line_to(segment.to.x, segment.to.y);
        if let Err(err) = ctx.stroke() {
            warn!("Failed to stroke segment: {}", err);
        }
    }

    fn clear(&mut self) {
        let Some(ctx) = self.context() else {
            return;
        };
        ctx.set_operator(cairo::Operator::Clear);
        if let Err(err) = ctx.paint() {
            warn!("Failed to clear surface: {}", err);
        }
    }

    fn render_text(&mut self, text: &str, anchor: Point, color: Color, font_size: f64) {
        self.clear();
        if text.is_empty() {
            return;
        }
        let Some(ctx) = self.context() else {
            return;
        };

        // Gray antialiasing; subpixel fringes on a transparent raster
        ctx.set_antialias(cairo::Antialias::Best);

        let layout = pangocairo::functions::create_layout(&ctx);
        let font_desc = pango::FontDescription::from_string(&self.font.to_pango_string(font_size));
        layout.set_font_description(Some(&font_desc));
        // Newlines are painted inline, like a single fillText call
        layout.set_single_paragraph_mode(true);
        layout.set_text(text);

        // Pango measures from the top-left corner; the anchor is the baseline
        let baseline = layout.baseline() as f64 / pango::SCALE as f64;
        trace!(
            "Rendering {} chars at ({}, {}) size {}",
            text.chars().count(),
            anchor.x,
            anchor.y,
            font_size
        );

        ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        ctx.move_to(anchor.x, anchor.y - baseline);
        pangocairo::functions::show_layout(&ctx, &layout);
    }

    fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.surface.flush();
        let mut buffer = Vec::new();
        self.surface.write_to_png(&mut buffer)?;
        Ok(buffer)
    }
}
