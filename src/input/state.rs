//! Drawing state machine.

use super::events::PointerEvent;
use crate::draw::{Point, StrokeSegment};
use crate::style::StyleContext;
use log::trace;

/// Current drawing mode.
///
/// Segments are only produced while [`DrawingState::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawingState {
    /// Not drawing - pointer motion is ignored
    #[default]
    Idle,
    /// Button held down - every move draws from `last` to the new position
    Active {
        /// Last sampled pointer position
        last: Point,
    },
}

/// Converts pointer events into an ordered sequence of stroke segments.
///
/// The state machine never touches pixels itself; callers apply the returned
/// segment to the canvas before processing the next event.
#[derive(Debug, Default)]
pub struct InputState {
    state: DrawingState,
}

impl InputState {
    /// Creates an idle state machine.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawingState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DrawingState::Active { .. })
    }

    /// Dispatches a pointer event, returning the segment to draw (if any).
    pub fn handle(&mut self, event: PointerEvent, style: &StyleContext) -> Option<StrokeSegment> {
        match event {
            PointerEvent::Down(pos) => {
                self.on_pointer_down(pos);
                None
            }
            PointerEvent::Move(pos) => self.on_pointer_move(pos, style),
            PointerEvent::Up => {
                self.on_pointer_up();
                None
            }
            PointerEvent::Leave => {
                self.on_pointer_leave();
                None
            }
        }
    }

    /// Starts a stroke at `pos`.
    ///
    /// A press while already active restarts the stroke from the new position.
    pub fn on_pointer_down(&mut self, pos: Point) {
        trace!("Stroke started at ({}, {})", pos.x, pos.y);
        self.state = DrawingState::Active { last: pos };
    }

    /// Extends the active stroke to `pos` using the current style.
    ///
    /// Returns `None` while idle.
    pub fn on_pointer_move(&mut self, pos: Point, style: &StyleContext) -> Option<StrokeSegment> {
        let DrawingState::Active { last } = &mut self.state else {
            return None;
        };

        let segment = StrokeSegment {
            from: *last,
            to: pos,
            color: style.color(),
            width: style.width() as f64,
        };
        *last = pos;
        Some(segment)
    }

    /// Ends the active stroke.
    pub fn on_pointer_up(&mut self) {
        self.stop();
    }

    /// Ends the active stroke when the pointer leaves the surface.
    pub fn on_pointer_leave(&mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if self.is_active() {
            trace!("Stroke finished");
        }
        self.state = DrawingState::Idle;
    }
}
