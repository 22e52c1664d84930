//! Transcribe a recorded pitch without analyzing it.
//!
//! Accepts an audio file path (or stdin) and prints the transcript, reusing
//! the same transcription pipeline as the `analyze` command. Defaults to
//! stdout so the transcript can be piped to other commands.

use std::path::PathBuf;

use crate::audio::{AudioFormat, AudioSource};
use crate::config::{Credentials, PitchgradeConfig};
use crate::presenter;
use crate::transcription;

/// Handles transcription of a recorded audio file.
///
/// # Arguments
/// * `file` - Path to the audio file, or `-` to read audio from stdin
/// * `stdin_format` - Audio encoding of stdin input (wav, mp3, m4a)
/// * `clipboard` - If true, copy to clipboard instead of stdout
/// * `output_file` - Optional file path to write output to instead of stdout
pub async fn handle_transcribe(
    file: PathBuf,
    stdin_format: Option<String>,
    clipboard: bool,
    output_file: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== pitchgrade Transcribe Command ===");

    let config = PitchgradeConfig::load_or_init().map_err(|err| {
        tracing::error!("Failed to load configuration: {err}");
        anyhow::anyhow!("Configuration error: {err}")
    })?;
    let credentials = Credentials::from_env();

    let model = transcription::TranscriptionModel::from_id(&config.transcription.model)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown transcription model '{}'. Available models: {}",
                config.transcription.model,
                transcription::TranscriptionModel::available_ids().join(", ")
            )
        })?;

    let transcription_config = transcription::TranscriptionConfig::new(
        model,
        credentials.require_deepgram()?.to_string(),
        config.transcription.options.clone(),
    );

    let format = AudioFormat::from_flag(stdin_format.as_deref())?;
    let source = AudioSource::open(&file, format)?;

    tracing::info!("Transcribing file: {}", source.path().display());
    let result = transcription::transcribe(&transcription_config, source.path()).await;
    drop(source);

    let transcript = result.map_err(|e| {
        tracing::error!("Transcription failed: {e}");
        e
    })?;
    tracing::debug!("Transcription completed: {} chars", transcript.len());

    // Output destination: file > clipboard > stdout (default)
    presenter::deliver(&transcript, clipboard, output_file.as_deref())?;

    Ok(())
}
