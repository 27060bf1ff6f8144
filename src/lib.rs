//! Freehand drawing surface with text overlay, PNG export and image recognition.
//!
//! Pointer events become stroke segments that are committed straight to a
//! Cairo raster. A text overlay can replace the drawing, the raster can be
//! saved as `drawing.png`, and a recognize command sends it to an external
//! service whose description is shown in a result display.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod recognition;
pub mod session;
pub mod style;
pub mod text;

pub use config::Config;
pub use session::{Command, Event, EventLoop, Session};
