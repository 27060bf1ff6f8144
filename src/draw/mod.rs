//! Rendering primitives (Cairo-based).
//!
//! This module defines the core drawing types of the sketchpad:
//! - [`Color`]: RGBA color representation with the named palette and hex parsing
//! - [`Point`] / [`StrokeSegment`]: pointer samples and the lines drawn between them
//! - [`Canvas`]: the primitive raster operations
//! - [`Surface`]: the Cairo/Pango implementation of [`Canvas`]

pub mod canvas;
pub mod color;
pub mod font;
pub mod segment;
pub mod surface;

pub use canvas::Canvas;
pub use color::Color;
pub use font::FontDescriptor;
pub use segment::{Point, StrokeSegment};
pub use surface::{Surface, SurfaceError};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
