//! Recognition service client.

use super::types::{RecognitionError, RecognitionRequest, RecognitionResponse};
use crate::config::{API_KEY_ENV, RecognitionConfig};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::{debug, warn};
use reqwest::Client;

/// Longest error body kept in a [`RecognitionError::Status`].
const MAX_ERROR_BODY: usize = 200;

/// Abstraction over the service that describes a PNG image.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Issues exactly one request and returns the description on success.
    async fn recognize(&self, image_png: &[u8]) -> Result<String, RecognitionError>;
}

/// Encodes PNG bytes as a `data:` URL.
pub fn png_data_url(image_png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(image_png))
}

/// Recognizer that POSTs the image to an HTTP endpoint.
///
/// No retries. The only timeout is the optional one from the config.
pub struct HttpRecognizer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for HttpRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecognizer")
            .field("endpoint", &self.endpoint)
            .field(
                "api_key",
                &crate::config::types::mask_secret(&self.api_key),
            )
            .finish()
    }
}

impl HttpRecognizer {
    pub fn new(config: &RecognitionConfig) -> Result<Self, RecognitionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let api_key = config.resolved_api_key().unwrap_or_else(|| {
            warn!(
                "No recognition API key configured (set recognition.api_key or {}); requests will likely be rejected",
                API_KEY_ENV
            );
            String::new()
        });

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Recognizer for HttpRecognizer {
    async fn recognize(&self, image_png: &[u8]) -> Result<String, RecognitionError> {
        let body = RecognitionRequest {
            image: png_data_url(image_png),
        };
        debug!(
            "POST {} ({} byte image)",
            self.endpoint,
            image_png.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body: String = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(RecognitionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: RecognitionResponse = serde_json::from_str(&text)
            .map_err(|e| RecognitionError::MalformedResponse(e.to_string()))?;

        debug!("Recognition service answered: {}", parsed.description);
        Ok(parsed.description)
    }
}
