//! Pointer positions and the stroke segments drawn between them.

use super::color::Color;

/// A pointer position in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single round-capped line between two consecutive pointer samples.
///
/// Segments are built by the input state machine, applied to a canvas and
/// dropped. The raster is the only record of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSegment {
    /// Previous pointer sample
    pub from: Point,
    /// Current pointer sample
    pub to: Point,
    /// Stroke color at the time the segment was emitted
    pub color: Color,
    /// Line width in pixels at the time the segment was emitted
    pub width: f64,
}

impl StrokeSegment {
    /// Euclidean length of the segment in pixels.
    pub fn length(&self) -> f64 {
        let dx = self.to.x - self.from.x;
        let dy = self.to.y - self.from.y;
        (dx * dx + dy * dy).sqrt()
    }
}
