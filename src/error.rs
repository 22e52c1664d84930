//! Pipeline error kinds.
//!
//! The two service calls can each fail with a user-visible message, and a
//! response body that parses but lacks the expected fields is reported as a
//! malformed response rather than a panic deep inside the extraction code.

use thiserror::Error;

/// Errors produced by the transcription and analysis service clients.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The transcription endpoint returned a non-success status or could
    /// not be reached. The message is already human-readable.
    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// The analysis endpoint returned a non-success status or could not be
    /// reached.
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// The endpoint answered with a success status but the body could not
    /// be parsed or is missing the field the transcript/feedback lives in.
    #[error("Malformed response from {service}: {detail}")]
    MalformedResponse {
        service: &'static str,
        detail: String,
    },
}
