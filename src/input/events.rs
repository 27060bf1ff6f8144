//! Pointer event types delivered by the host surface.

use crate::draw::Point;

/// Pointer device event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at a position
    Down(Point),
    /// Pointer moved to a position
    Move(Point),
    /// Primary button released
    Up,
    /// Pointer left the drawing surface
    Leave,
}
