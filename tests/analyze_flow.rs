//! End-to-end pipeline tests against mock transcription and analysis
//! endpoints.
//!
//! The pipeline is exercised the way the analyze command runs it: the
//! analysis stage is only ever reached once transcription has succeeded,
//! so a transcription failure must leave the analysis endpoint untouched.

use std::io::Write;
use std::path::Path;

use pitchgrade::analysis::{self, AnalysisConfig, AnalysisModel};
use pitchgrade::config::DeepgramOptions;
use pitchgrade::error::ServiceError;
use pitchgrade::transcription::{self, TranscriptionConfig, TranscriptionModel};

const TRANSCRIPT: &str = "Hello, I'd like to show you our product.";
const FEEDBACK: &str = "Score: 8/10. Great pitch!";

fn wav_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .unwrap();
    file.write_all(b"RIFF....WAVEfmt ").unwrap();
    file
}

fn transcription_config(server_url: &str) -> TranscriptionConfig {
    TranscriptionConfig::new(
        TranscriptionModel::Nova3,
        "dg-test-key".to_string(),
        DeepgramOptions::default(),
    )
    .with_endpoint(format!("{server_url}/v1/listen"))
}

fn analysis_config(server_url: &str) -> AnalysisConfig {
    AnalysisConfig::new(AnalysisModel::Gpt4, "oa-test-key".to_string(), 0.7)
        .with_endpoint(format!("{server_url}/v1/chat/completions"))
}

/// The two stages chained exactly as the analyze command chains them.
async fn run_pipeline(
    transcription_config: &TranscriptionConfig,
    analysis_config: &AnalysisConfig,
    audio: &Path,
) -> Result<(String, String), ServiceError> {
    let transcript = transcription::transcribe(transcription_config, audio).await?;
    let feedback = analysis::analyze(analysis_config, &transcript).await?;
    Ok((transcript, feedback))
}

#[tokio::test]
async fn wav_upload_yields_exact_transcript_and_feedback() {
    let mut server = mockito::Server::new_async().await;

    let listen = server
        .mock("POST", "/v1/listen")
        .match_query(mockito::Matcher::Any)
        .match_header("authorization", "Token dg-test-key")
        .match_header("content-type", "audio/wav")
        .with_status(200)
        .with_body(format!(
            r#"{{"results":{{"channels":[{{"alternatives":[{{"transcript":"{TRANSCRIPT}"}}]}}]}}}}"#
        ))
        .create_async()
        .await;

    // The coaching prompt must carry the transcript verbatim
    let chat = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer oa-test-key")
        .match_body(mockito::Matcher::Regex(
            "I'd like to show you our product".to_string(),
        ))
        .with_status(200)
        .with_body(format!(
            r#"{{"choices":[{{"message":{{"content":"{FEEDBACK}"}}}}]}}"#
        ))
        .create_async()
        .await;

    let audio = wav_fixture();
    let (transcript, feedback) = run_pipeline(
        &transcription_config(&server.url()),
        &analysis_config(&server.url()),
        audio.path(),
    )
    .await
    .unwrap();

    assert_eq!(transcript, TRANSCRIPT);
    assert_eq!(feedback, FEEDBACK);
    listen.assert_async().await;
    chat.assert_async().await;
}

#[tokio::test]
async fn transcription_failure_issues_no_analysis_call() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/v1/listen")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .with_body(r#"{"err_msg":"invalid credentials"}"#)
        .create_async()
        .await;

    let chat = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let audio = wav_fixture();
    let err = run_pipeline(
        &transcription_config(&server.url()),
        &analysis_config(&server.url()),
        audio.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Transcription(_)));
    chat.assert_async().await;
}

#[tokio::test]
async fn analysis_failure_yields_error_and_no_feedback() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/v1/listen")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"results":{"channels":[{"alternatives":[{"transcript":"test"}]}]}}"#)
        .create_async()
        .await;

    server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let audio = wav_fixture();
    let err = run_pipeline(
        &transcription_config(&server.url()),
        &analysis_config(&server.url()),
        audio.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Analysis(_)));
}

#[tokio::test]
async fn malformed_transcription_body_is_classified_not_a_crash() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/v1/listen")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let chat = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let audio = wav_fixture();
    let err = run_pipeline(
        &transcription_config(&server.url()),
        &analysis_config(&server.url()),
        audio.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::MalformedResponse { .. }));
    chat.assert_async().await;
}
