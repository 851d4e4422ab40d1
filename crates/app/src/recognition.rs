//! Plate recognition service client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Configuration for the external plate recognition service.
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// Recognition endpoint, e.g.
    /// `https://api.platerecognizer.com/v1/plate-reader/`.
    pub url: String,

    /// API token sent with every request.
    pub api_token: String,

    /// Upper bound on a single recognition call.
    pub timeout: Duration,
}

/// One plate reading reported by the recognition service.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateReading {
    /// Raw plate text as reported.
    pub plate: String,

    /// Service-reported reading confidence.
    pub confidence: f64,
}

/// Errors that can occur when communicating with the recognition service.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The recognition call exceeded its deadline.
    #[error("recognition service timed out")]
    Timeout,

    /// The service answered with an unexpected status.
    #[error("recognition service failed with status {status}")]
    Service {
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body, verbatim.
        body: String,
    },

    /// Transport or decoding failure.
    #[error("recognition http error: {0}")]
    Http(#[from] reqwest::Error),
}

#[automock]
#[async_trait]
/// Black-box plate recognition: an image in, zero or more readings out.
///
/// An empty reading list is a valid, non-error outcome.
pub trait RecognitionService: Send + Sync {
    /// Recognises plates in a captured image.
    async fn recognize(&self, image: &[u8]) -> Result<Vec<PlateReading>, RecognitionError>;
}

/// HTTP client for the Plate Recognizer API.
#[derive(Debug, Clone)]
pub struct PlateRecognizerClient {
    config: RecognizerConfig,
    http: Client,
}

impl PlateRecognizerClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl RecognitionService for PlateRecognizerClient {
    async fn recognize(&self, image: &[u8]) -> Result<Vec<PlateReading>, RecognitionError> {
        let part = reqwest::multipart::Part::bytes(image.to_vec()).file_name("upload.jpg");
        let form = reqwest::multipart::Form::new().part("upload", part);

        let response = self
            .http
            .post(&self.config.url)
            .header("Authorization", format!("Token {}", self.config.api_token))
            .multipart(form)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    RecognitionError::Timeout
                } else {
                    RecognitionError::Http(error)
                }
            })?;

        // The plate reader answers 201 on success.
        if response.status() != StatusCode::CREATED {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(RecognitionError::Service { status, body });
        }

        let parsed: ReaderResponse = response.json().await?;

        Ok(parsed
            .results
            .into_iter()
            .map(|result| PlateReading {
                plate: result.plate,
                confidence: result.score,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct ReaderResponse {
    #[serde(default)]
    results: Vec<ReaderResult>,
}

#[derive(Debug, Deserialize)]
struct ReaderResult {
    #[serde(default)]
    plate: String,

    #[serde(default)]
    score: f64,
}
