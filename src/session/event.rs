//! Typed events flowing from producers into the event loop.
//!
//! User events and recognition completions share one queue, so the loop sees
//! them in the order they were enqueued. Dropping the last [`EventSender`]
//! enqueues an end-of-input marker behind everything already sent.

use crate::input::PointerEvent;
use crate::recognition::RecognitionCompletion;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Zero-argument user commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Blank the raster and the result display
    Clear,
    /// Write the raster to `drawing.png`
    Save,
    /// Send the raster to the recognition service
    Recognize,
}

/// Everything a producer can ask the event loop to do, processed strictly in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Pointer(PointerEvent),
    /// Color picker value (hex or palette name)
    SetColor(String),
    /// Stroke width in pixels
    SetWidth(u32),
    /// Full current contents of the text input
    SetText(String),
    Command(Command),
    /// Stop immediately without waiting for in-flight recognitions
    Shutdown,
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Event::Pointer(event)
    }
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        Event::Command(command)
    }
}

/// One entry of the loop's queue.
#[derive(Debug)]
pub(crate) enum Envelope {
    Event(Event),
    Completion(RecognitionCompletion),
    /// Every [`EventSender`] clone has been dropped
    InputClosed,
}

/// Returned when the event loop is gone.
#[derive(Debug, Error)]
#[error("event loop stopped")]
pub struct EventLoopStopped;

#[derive(Debug)]
struct InputGuard {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        // Fails only when the loop is already gone
        let _ = self.tx.send(Envelope::InputClosed);
    }
}

/// Producer half of the event bus. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Envelope>,
    _input: Arc<InputGuard>,
}

impl EventSender {
    pub fn send(&self, event: Event) -> Result<(), EventLoopStopped> {
        self.tx
            .send(Envelope::Event(event))
            .map_err(|_| EventLoopStopped)
    }
}

/// Queues finished recognition requests behind the user events enqueued before them.
#[derive(Debug, Clone)]
pub struct CompletionSender {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl CompletionSender {
    /// Returns `false` when the event loop is gone.
    pub fn send(&self, completion: RecognitionCompletion) -> bool {
        self.tx.send(Envelope::Completion(completion)).is_ok()
    }
}

/// Consumer half of the event bus, drained by [`EventLoop::run`](super::EventLoop::run).
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<Envelope>,
    completions: CompletionSender,
}

impl EventReceiver {
    /// Sender for the recognition manager. Does not keep the input open.
    pub fn completion_sender(&self) -> CompletionSender {
        self.completions.clone()
    }

    pub(crate) async fn recv(&mut self) -> Option<Envelope> {
        self.rx.recv().await
    }

    #[cfg(test)]
    pub(crate) async fn next_completion(&mut self) -> Option<RecognitionCompletion> {
        loop {
            match self.rx.recv().await? {
                Envelope::Completion(completion) => return Some(completion),
                _ => continue,
            }
        }
    }
}

/// Creates the event bus connecting producers to an [`EventLoop`](super::EventLoop).
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sender = EventSender {
        tx: tx.clone(),
        _input: Arc::new(InputGuard { tx: tx.clone() }),
    };
    let receiver = EventReceiver {
        rx,
        completions: CompletionSender { tx },
    };
    (sender, receiver)
}
