//! Drawing session: the surface plus everything that mutates it.
//!
//! A [`Session`] owns the canvas, the style context, the stroke state machine,
//! the text overlay and the result display. The [`EventLoop`] feeds it typed
//! [`Event`]s one at a time; recognition requests are the only work that runs
//! outside that loop.

mod dispatch;
pub mod display;
pub mod event;
mod event_loop;
pub mod script;

pub use display::{FAILURE_MESSAGE, ResultDisplay, SUCCESS_PREFIX};
pub use event::{
    Command, CompletionSender, Event, EventLoopStopped, EventReceiver, EventSender, event_channel,
};
pub use event_loop::EventLoop;

use crate::config::Config;
use crate::draw::{Canvas, Surface, SurfaceError};
use crate::export;
use crate::input::{InputState, PointerEvent};
use crate::recognition::RecognitionOutcome;
use crate::style::StyleContext;
use crate::text::TextOverlay;
use log::{error, trace};
use std::path::PathBuf;

/// Drawing session state.
pub struct Session<C: Canvas = Surface> {
    canvas: C,
    style: StyleContext,
    input: InputState,
    overlay: TextOverlay,
    display: ResultDisplay,
    export_dir: PathBuf,
}

impl Session<Surface> {
    /// Creates a session with a Cairo surface sized and styled from `config`.
    pub fn from_config(config: &Config) -> Result<Self, SurfaceError> {
        let surface = Surface::with_font(config.canvas.width, config.canvas.height, config.font())?;
        Ok(Self::new(
            surface,
            config.initial_style(),
            TextOverlay::new(config.text_anchor()),
            export::expand_tilde(&config.export.directory),
        ))
    }
}

impl<C: Canvas> Session<C> {
    pub fn new(canvas: C, style: StyleContext, overlay: TextOverlay, export_dir: PathBuf) -> Self {
        Self {
            canvas,
            style,
            input: InputState::new(),
            overlay,
            display: ResultDisplay::new(),
            export_dir,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn style(&self) -> &StyleContext {
        &self.style
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn display(&self) -> &ResultDisplay {
        &self.display
    }

    /// Runs the stroke state machine and commits any segment synchronously.
    pub fn on_pointer(&mut self, event: PointerEvent) {
        if let Some(segment) = self.input.handle(event, &self.style) {
            trace!(
                "Committing segment ({:.1}px long, width {})",
                segment.length(),
                segment.width
            );
            self.canvas.draw_segment(&segment);
        }
    }

    /// Applies a color picker value to subsequent drawing.
    pub fn set_color(&mut self, value: &str) {
        self.style.set_color_str(value);
    }

    /// Applies a stroke width to subsequent drawing.
    pub fn set_width(&mut self, width: u32) {
        self.style.set_width(width);
    }

    /// Re-renders the text overlay, replacing everything on the raster.
    pub fn set_text(&mut self, text: &str) {
        self.overlay.apply(&mut self.canvas, text, &self.style);
    }

    /// Blanks the raster and the result display.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.display.clear();
    }

    /// Encodes the current raster.
    pub fn snapshot(&self) -> Result<Vec<u8>, SurfaceError> {
        self.canvas.export_png()
    }

    /// Saves the raster as `drawing.png`. Best effort: failures are only logged.
    pub fn save(&self) -> Option<PathBuf> {
        let result = self
            .snapshot()
            .map_err(export::ExportError::from)
            .and_then(|png| export::save_drawing(&png, &self.export_dir));

        match result {
            Ok(path) => Some(path),
            Err(err) => {
                error!("Save failed: {}", err);
                None
            }
        }
    }

    /// Shows a recognition outcome in the result display.
    pub fn show_recognition(&mut self, outcome: &RecognitionOutcome) {
        self.display.show(outcome);
    }
}
