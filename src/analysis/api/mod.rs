//! Analysis API client.
//!
//! OpenAI's chat completions API generates the coaching feedback: one JSON
//! POST carrying the fixed coaching prompt with the transcript substituted
//! in, answered by generated text nested under `choices[].message`.

mod openai;

use crate::error::ServiceError;

use super::model::AnalysisModel;

/// Configuration for analysis requests
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// The model to use
    pub model: AnalysisModel,
    /// The API key for authentication
    pub api_key: String,
    /// Sampling temperature for the generation
    pub temperature: f64,
    /// Endpoint override, used by tests to point at a mock server
    pub endpoint: Option<String>,
}

impl AnalysisConfig {
    /// Creates a new analysis configuration
    pub fn new(model: AnalysisModel, api_key: String, temperature: f64) -> Self {
        Self {
            model,
            api_key,
            temperature,
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

/// Requests coaching feedback for a pitch transcript.
///
/// # Errors
/// - `ServiceError::Analysis` if the request fails (connection, timeout)
///   or the API returns a non-success status
/// - `ServiceError::MalformedResponse` if the response body cannot be
///   parsed or contains no generated message
pub async fn analyze(config: &AnalysisConfig, transcript: &str) -> Result<String, ServiceError> {
    tracing::info!(
        "Requesting pitch feedback from OpenAI ({})",
        config.model.id()
    );

    openai::analyze(config, transcript).await
}
