//! Input handling and the stroke-capture state machine.
//!
//! This module turns the host's pointer events into stroke segments. It tracks
//! whether a stroke is in progress and the last sampled pointer position.

pub mod events;
pub mod state;

pub use events::PointerEvent;
pub use state::{DrawingState, InputState};
