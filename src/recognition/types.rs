//! Data types for the recognition service.

use crate::draw::SurfaceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body sent to the recognition service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecognitionRequest {
    /// `data:image/png;base64,...` URL of the raster
    pub image: String,
}

/// Successful service response. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionResponse {
    pub description: String,
}

/// Outcome of a single recognize command.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    /// Human-readable description returned by the service
    Success(String),
    /// Root cause, kept for diagnostics only
    Failure(String),
}

/// Errors that can occur during recognition.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Failed to encode drawing: {0}")]
    Encode(#[from] SurfaceError),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Recognition task failed: {0}")]
    Task(String),
}
