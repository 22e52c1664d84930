//! Transcription API client.
//!
//! Deepgram is the transcription provider: a single synchronous POST of the
//! raw audio bytes returns the transcript nested inside a structured
//! response. Formatting options from the config file are passed as query
//! parameters.

mod deepgram;

use std::path::Path;

use crate::audio::AudioFormat;
use crate::config::file::DeepgramOptions;
use crate::error::ServiceError;

use super::model::TranscriptionModel;

/// Configuration for transcription requests
#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    /// The model to use
    pub model: TranscriptionModel,
    /// The API key for authentication
    pub api_key: String,
    /// Formatting options forwarded as query parameters
    pub options: DeepgramOptions,
    /// Endpoint override, used by tests to point at a mock server
    pub endpoint: Option<String>,
}

impl TranscriptionConfig {
    /// Creates a new transcription configuration
    pub fn new(model: TranscriptionModel, api_key: String, options: DeepgramOptions) -> Self {
        Self {
            model,
            api_key,
            options,
            endpoint: None,
        }
    }

    /// Replaces the default endpoint, e.g. with a mock server URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.model.endpoint())
    }
}

/// Transcribes an audio file using the configured transcription model.
///
/// The audio encoding is derived from the file extension and declared as
/// the request content type.
///
/// # Errors
/// - `ServiceError::Transcription` if the file cannot be read, the request
///   fails (connection, timeout), or the API returns a non-success status
/// - `ServiceError::MalformedResponse` if the response body cannot be
///   parsed or lacks a transcript
pub async fn transcribe(
    config: &TranscriptionConfig,
    audio_path: &Path,
) -> Result<String, ServiceError> {
    let format = AudioFormat::from_path(audio_path)
        .map_err(|e| ServiceError::Transcription(e.to_string()))?;

    tracing::info!(
        "Transcribing {} with Deepgram ({})",
        audio_path.display(),
        config.model.id()
    );

    deepgram::transcribe(config, audio_path, format).await
}
