//! Deepgram API implementation.
//!
//! Handles transcription requests to Deepgram's listen API. The audio is
//! sent as the raw request body with token authentication; the transcript
//! comes back nested under `results.channels[].alternatives[]`.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::audio::AudioFormat;
use crate::error::ServiceError;

use super::TranscriptionConfig;

const SERVICE: &str = "Deepgram";

/// Overall request timeout; pitches are short but uploads can be slow links
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Connection establishment timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Response from the listen endpoint
#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: Option<ListenResults>,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
}

/// Transcribes an audio file using Deepgram's listen API.
///
/// Sends the raw audio bytes with `Token` authentication and a content type
/// matching the audio encoding. Formatting options are passed as query
/// parameters.
pub async fn transcribe(
    config: &TranscriptionConfig,
    audio_path: &Path,
    format: AudioFormat,
) -> Result<String, ServiceError> {
    let audio_data = std::fs::read(audio_path)
        .map_err(|e| ServiceError::Transcription(format!("Failed to read audio file: {e}")))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| ServiceError::Transcription(format!("Failed to create HTTP client: {e}")))?;

    let url = format!("{}?{}", config.endpoint(), build_query(config));

    tracing::debug!(
        "Deepgram API Call:\n  URL: {}\n  Method: POST\n  Headers:\n    Authorization: Token <redacted>\n    Content-Type: {}\n  Body: {} bytes of audio",
        url,
        format.mime_type(),
        audio_data.len()
    );

    let response = match client
        .post(&url)
        .header("Authorization", format!("Token {}", config.api_key))
        .header("Content-Type", format.mime_type())
        .body(audio_data)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            let error_msg = if e.is_connect() {
                "Failed to connect to the Deepgram API server. Check your internet connection."
                    .to_string()
            } else if e.is_timeout() {
                "Request to Deepgram timed out. The API server is not responding.".to_string()
            } else {
                format!("Deepgram network error: {e}")
            };
            return Err(ServiceError::Transcription(error_msg));
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ServiceError::Transcription(format_error(
            status.as_u16(),
            &error_body,
        )));
    }

    let listen: ListenResponse = response
        .json()
        .await
        .map_err(|e| ServiceError::MalformedResponse {
            service: SERVICE,
            detail: format!("response body is not the expected JSON: {e}"),
        })?;

    let transcript = listen
        .results
        .as_ref()
        .and_then(|r| r.channels.first())
        .and_then(|c| c.alternatives.first())
        .map(|a| a.transcript.trim().to_string())
        .ok_or_else(|| ServiceError::MalformedResponse {
            service: SERVICE,
            detail: "no transcript at results.channels[0].alternatives[0]".to_string(),
        })?;

    tracing::debug!("Transcription completed: {} chars", transcript.len());

    Ok(transcript)
}

/// Builds the query string from the model name and formatting options.
fn build_query(config: &TranscriptionConfig) -> String {
    let opts = &config.options;
    let mut params: Vec<(&str, String)> = vec![(
        "model",
        config.model.api_model_name().to_string(),
    )];

    let flags = [
        ("punctuate", opts.punctuate),
        ("smart_format", opts.smart_format),
        ("filler_words", opts.filler_words),
        ("numerals", opts.numerals),
        ("profanity_filter", opts.profanity_filter),
        ("detect_language", opts.detect_language),
    ];
    for (name, enabled) in flags {
        if enabled {
            params.push((name, "true".to_string()));
        }
    }

    params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Formats HTTP error codes into human-readable messages.
fn format_error(status: u16, error_body: &str) -> String {
    match status {
        401 => "Deepgram API key is invalid or expired. Set DEEPGRAM_API_KEY and try again."
            .to_string(),
        403 => "You don't have permission to use Deepgram's API. Check your API key and account status."
            .to_string(),
        429 => "Too many requests to Deepgram. You've hit the API rate limit. Please wait and try again."
            .to_string(),
        500 | 502 | 503 | 504 => {
            "Deepgram API server is experiencing issues. Please try again later.".to_string()
        }
        _ => {
            // Deepgram error bodies carry the reason under "err_msg"
            let detail = serde_json::from_str::<serde_json::Value>(error_body)
                .ok()
                .and_then(|v| v["err_msg"].as_str().map(str::to_string))
                .unwrap_or_else(|| error_body.to_string());
            format!("Deepgram API error (status {status}): {detail}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::DeepgramOptions;
    use crate::transcription::TranscriptionModel;
    use std::io::Write;

    fn wav_fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".wav")
            .tempfile()
            .unwrap();
        file.write_all(b"RIFF....WAVEfmt ").unwrap();
        file
    }

    fn test_config(endpoint: &str) -> TranscriptionConfig {
        TranscriptionConfig::new(
            TranscriptionModel::Nova3,
            "test-key".to_string(),
            DeepgramOptions::default(),
        )
        .with_endpoint(endpoint)
    }

    #[tokio::test]
    async fn extracts_transcript_from_nested_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/listen")
            .match_query(mockito::Matcher::Regex("model=nova-3".to_string()))
            .match_header("authorization", "Token test-key")
            .match_header("content-type", "audio/wav")
            .with_status(200)
            .with_body(
                r#"{"results":{"channels":[{"alternatives":[{"transcript":"Hello, I'd like to show you our product."}]}]}}"#,
            )
            .create_async()
            .await;

        let audio = wav_fixture();
        let config = test_config(&format!("{}/v1/listen", server.url()));
        let transcript = transcribe(&config, audio.path(), AudioFormat::Wav)
            .await
            .unwrap();

        assert_eq!(transcript, "Hello, I'd like to show you our product.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_transcription_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/listen")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .with_body(r#"{"err_msg":"invalid credentials"}"#)
            .create_async()
            .await;

        let audio = wav_fixture();
        let config = test_config(&format!("{}/v1/listen", server.url()));
        let err = transcribe(&config, audio.path(), AudioFormat::Wav)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Transcription(_)));
        assert!(err.to_string().contains("DEEPGRAM_API_KEY"));
    }

    #[tokio::test]
    async fn missing_transcript_field_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/listen")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results":{"channels":[]}}"#)
            .create_async()
            .await;

        let audio = wav_fixture();
        let config = test_config(&format!("{}/v1/listen", server.url()));
        let err = transcribe(&config, audio.path(), AudioFormat::Wav)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::MalformedResponse { service: "Deepgram", .. }
        ));
    }

    #[test]
    fn query_contains_only_enabled_options() {
        let options = DeepgramOptions {
            punctuate: true,
            smart_format: true,
            ..DeepgramOptions::default()
        };
        let config = TranscriptionConfig::new(
            TranscriptionModel::Nova2,
            "k".to_string(),
            options,
        );

        let query = build_query(&config);
        assert!(query.starts_with("model=nova-2"));
        assert!(query.contains("punctuate=true"));
        assert!(query.contains("smart_format=true"));
        assert!(!query.contains("filler_words"));
    }
}
