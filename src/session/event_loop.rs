//! Single-threaded event loop driving a session.

use super::event::{Envelope, EventReceiver};
use super::{Event, Session};
use crate::draw::Canvas;
use crate::recognition::{RecognitionCompletion, RecognitionManager};
use log::{debug, info};

/// Processes events strictly in arrival order.
///
/// Pointer, style and text events mutate the surface synchronously before the
/// next event is read. Recognition requests suspend in their own tasks; their
/// completions are queued behind whatever user events arrived first and are
/// applied like any other event.
pub struct EventLoop<C: Canvas> {
    session: Session<C>,
    recognition: RecognitionManager,
}

impl<C: Canvas> EventLoop<C> {
    /// `recognition` must report through the completion sender of the
    /// [`EventReceiver`] later passed to [`EventLoop::run`].
    pub fn new(session: Session<C>, recognition: RecognitionManager) -> Self {
        Self {
            session,
            recognition,
        }
    }

    /// Applies one event. [`Event::Shutdown`] is handled by [`EventLoop::run`].
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Pointer(pointer) => self.session.on_pointer(pointer),
            Event::SetColor(color) => self.session.set_color(&color),
            Event::SetWidth(width) => self.session.set_width(width),
            Event::SetText(text) => self.session.set_text(&text),
            Event::Command(command) => self.session.dispatch(command, &mut self.recognition),
            Event::Shutdown => {}
        }
    }

    /// Applies a finished recognition to the display, subject to the overlap policy.
    pub fn apply_completion(&mut self, completion: RecognitionCompletion) {
        if let Some(outcome) = self.recognition.accept(completion) {
            self.session.show_recognition(&outcome);
        }
    }

    /// Runs until [`Event::Shutdown`], or until every [`EventSender`](super::EventSender)
    /// is dropped and every in-flight recognition has completed. Returns the session.
    pub async fn run(mut self, mut events: EventReceiver) -> Session<C> {
        let mut input_closed = false;

        while !(input_closed && self.recognition.in_flight() == 0) {
            let Some(envelope) = events.recv().await else {
                break;
            };

            match envelope {
                Envelope::Event(Event::Shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                Envelope::Event(event) => self.handle_event(event),
                Envelope::Completion(completion) => self.apply_completion(completion),
                Envelope::InputClosed => {
                    debug!(
                        "Event senders dropped; waiting for {} recognition request(s)",
                        self.recognition.in_flight()
                    );
                    input_closed = true;
                }
            }
        }

        self.session
    }
}
