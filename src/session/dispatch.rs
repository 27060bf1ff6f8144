//! Routing of user commands to the surface and the recognition manager.

use super::{Command, Session};
use crate::draw::Canvas;
use crate::recognition::{RecognitionError, RecognitionManager};
use log::{debug, info};

impl<C: Canvas> Session<C> {
    /// Executes a command.
    ///
    /// `Recognize` snapshots the raster synchronously and returns as soon as
    /// the request is submitted; the outcome arrives later as a completion.
    pub fn dispatch(&mut self, command: Command, recognition: &mut RecognitionManager) {
        debug!("Dispatching {:?}", command);
        match command {
            Command::Clear => {
                self.clear();
                recognition.invalidate();
            }
            Command::Save => {
                if let Some(path) = self.save() {
                    info!("Drawing saved to {}", path.display());
                }
            }
            Command::Recognize => match self.snapshot() {
                Ok(png) => {
                    recognition.submit(png);
                }
                Err(err) => {
                    let outcome = recognition.reject(RecognitionError::from(err));
                    self.show_recognition(&outcome);
                }
            },
        }
    }
}
