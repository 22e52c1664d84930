//! OpenAI chat completions implementation.
//!
//! Sends the coaching prompt as a single user-role message with bearer
//! token authentication and extracts the generated feedback text.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::prompt::build_coaching_prompt;
use crate::error::ServiceError;

use super::AnalysisConfig;

const SERVICE: &str = "OpenAI";

/// Overall request timeout; GPT-4 grading a long pitch can take a while
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Connection establishment timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: GeneratedMessage,
}

#[derive(Debug, Deserialize)]
struct GeneratedMessage {
    content: String,
}

/// Requests coaching feedback from OpenAI's chat completions API.
pub async fn analyze(config: &AnalysisConfig, transcript: &str) -> Result<String, ServiceError> {
    let prompt = build_coaching_prompt(transcript);

    let request = ChatRequest {
        model: config.model.api_model_name(),
        messages: vec![ChatMessage {
            role: "user",
            content: &prompt,
        }],
        temperature: config.temperature,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| ServiceError::Analysis(format!("Failed to create HTTP client: {e}")))?;

    let url = config.endpoint();

    tracing::debug!(
        "OpenAI API Call:\n  URL: {}\n  Method: POST\n  Headers:\n    Authorization: Bearer <redacted>\n    Content-Type: application/json\n  Body parameters: model={}, temperature={}, prompt {} chars",
        url,
        config.model.api_model_name(),
        config.temperature,
        prompt.len()
    );

    let response = match client
        .post(url)
        .bearer_auth(&config.api_key)
        .json(&request)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            let error_msg = if e.is_connect() {
                "Failed to connect to the OpenAI API server. Check your internet connection."
                    .to_string()
            } else if e.is_timeout() {
                "Request to OpenAI timed out. The API server is not responding.".to_string()
            } else {
                format!("OpenAI network error: {e}")
            };
            return Err(ServiceError::Analysis(error_msg));
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ServiceError::Analysis(format_error(
            status.as_u16(),
            &error_body,
        )));
    }

    let chat: ChatResponse = response
        .json()
        .await
        .map_err(|e| ServiceError::MalformedResponse {
            service: SERVICE,
            detail: format!("response body is not the expected JSON: {e}"),
        })?;

    let feedback = chat
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .ok_or_else(|| ServiceError::MalformedResponse {
            service: SERVICE,
            detail: "no generated message at choices[0].message.content".to_string(),
        })?;

    tracing::debug!("Feedback received: {} chars", feedback.len());

    Ok(feedback)
}

/// Formats HTTP error codes into human-readable messages.
fn format_error(status: u16, error_body: &str) -> String {
    match status {
        401 => "OpenAI API key is invalid or expired. Set OPENAI_API_KEY and try again."
            .to_string(),
        403 => "You don't have permission to use OpenAI's API. Check your API key and account status."
            .to_string(),
        429 => "Too many requests to OpenAI. You've hit the API rate limit. Please wait and try again."
            .to_string(),
        500 | 502 | 503 | 504 => {
            "OpenAI API server is experiencing issues. Please try again later.".to_string()
        }
        _ => {
            // OpenAI error bodies carry the reason under error.message
            let detail = serde_json::from_str::<serde_json::Value>(error_body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| error_body.to_string());
            format!("OpenAI API error (status {status}): {detail}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisModel;

    fn test_config(endpoint: &str) -> AnalysisConfig {
        AnalysisConfig::new(AnalysisModel::Gpt4, "test-key".to_string(), 0.7)
            .with_endpoint(endpoint)
    }

    #[tokio::test]
    async fn extracts_feedback_and_sends_transcript_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::Regex("a one of a kind widget".to_string()),
                mockito::Matcher::Regex("gpt-4".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"Score: 8/10. Great pitch!"}}]}"#)
            .create_async()
            .await;

        let config = test_config(&format!("{}/v1/chat/completions", server.url()));
        let feedback = analyze(&config, "We sell a one of a kind widget.")
            .await
            .unwrap();

        assert_eq!(feedback, "Score: 8/10. Great pitch!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_analysis_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"rate limited"}}"#)
            .create_async()
            .await;

        let config = test_config(&format!("{}/v1/chat/completions", server.url()));
        let err = analyze(&config, "test").await.unwrap_err();

        assert!(matches!(err, ServiceError::Analysis(_)));
        assert!(err.to_string().contains("rate limit"));
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let config = test_config(&format!("{}/v1/chat/completions", server.url()));
        let err = analyze(&config, "test").await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::MalformedResponse { service: "OpenAI", .. }
        ));
    }
}
