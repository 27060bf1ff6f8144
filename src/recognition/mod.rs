//! Image recognition for the current drawing.
//!
//! This module provides:
//! - The wire protocol of the external recognition service
//! - A [`Recognizer`] abstraction with an HTTP implementation
//! - [`RecognitionManager`], which runs requests off the event loop and feeds
//!   their outcomes back to it

pub mod client;
pub mod types;

mod manager;
#[cfg(test)]
mod tests;

pub use client::{HttpRecognizer, Recognizer, png_data_url};
pub use manager::{RecognitionCompletion, RecognitionManager, RequestId};
pub use types::{RecognitionError, RecognitionOutcome, RecognitionRequest, RecognitionResponse};
