//! Analyze a recorded sales pitch.
//!
//! Runs the full pipeline: transcribe the recording with the configured
//! transcription model, show the transcript, then ask the analysis model
//! for structured coaching feedback and show that. The flow is strictly
//! linear — an error in either stage stops it with no partial output.

use std::path::PathBuf;

use cliclack::{intro, outro};
use console::style;

use crate::analysis;
use crate::audio::{AudioFormat, AudioSource};
use crate::config::{Credentials, PitchgradeConfig};
use crate::presenter;
use crate::transcription;

/// Handles the full analyze pipeline for one recording.
///
/// # Arguments
/// * `file` - Path to the recorded pitch, or `-` to read audio from stdin
/// * `stdin_format` - Audio encoding of stdin input (wav, mp3, m4a)
/// * `clipboard` - If true, copy the report to clipboard instead of
///   rendering it on the terminal
/// * `output_file` - Optional file path to write the report to instead
pub async fn handle_analyze(
    file: PathBuf,
    stdin_format: Option<String>,
    clipboard: bool,
    output_file: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== pitchgrade Analyze Command ===");

    let config = PitchgradeConfig::load_or_init().map_err(|err| {
        tracing::error!("Failed to load configuration: {err}");
        anyhow::anyhow!("Configuration error: {err}")
    })?;
    let credentials = Credentials::from_env();

    // Resolve both stages up front so a config typo or missing key fails
    // before any audio is uploaded.
    let transcription_config = transcription_config(&config, &credentials)?;
    let analysis_config = analysis_config(&config, &credentials)?;

    let format = AudioFormat::from_flag(stdin_format.as_deref())?;
    let source = AudioSource::open(&file, format)?;

    // Report straight to the terminal unless delivery elsewhere was asked for
    let render_to_terminal = output_file.is_none() && !clipboard;

    if render_to_terminal {
        intro(style(" pitchgrade ").on_white().black())?;
    }

    let spinner = cliclack::spinner();
    spinner.start("Transcribing recording...");
    let result = transcription::transcribe(&transcription_config, source.path()).await;
    // Spooled stdin audio is deleted here, as soon as transcription is done
    drop(source);

    let transcript = match result {
        Ok(transcript) => {
            spinner.stop("Transcription complete");
            transcript
        }
        Err(e) => {
            tracing::error!("Transcription failed: {e}");
            spinner.error("Transcription failed");
            return Err(e.into());
        }
    };

    // The coaching prompt is only ever built from a non-empty transcript
    if transcript.is_empty() {
        return Err(anyhow::anyhow!(
            "No speech was recognized in the recording, so there is nothing to analyze."
        ));
    }

    if render_to_terminal {
        presenter::print_transcript(&transcript);
        println!();
    }

    let spinner = cliclack::spinner();
    spinner.start("Analyzing pitch...");
    let feedback = match analysis::analyze(&analysis_config, &transcript).await {
        Ok(feedback) => {
            spinner.stop("Analysis complete");
            feedback
        }
        Err(e) => {
            tracing::error!("Analysis failed: {e}");
            spinner.error("Analysis failed");
            return Err(e.into());
        }
    };

    if render_to_terminal {
        presenter::print_feedback(&feedback);
        println!();
        outro("Done")?;
    } else {
        let report = presenter::render_report(&transcript, &feedback);
        presenter::deliver(&report, clipboard, output_file.as_deref())?;
    }

    tracing::info!("Analysis completed");
    Ok(())
}

/// Builds the transcription stage config from file config and credentials.
fn transcription_config(
    config: &PitchgradeConfig,
    credentials: &Credentials,
) -> anyhow::Result<transcription::TranscriptionConfig> {
    let model = transcription::TranscriptionModel::from_id(&config.transcription.model)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown transcription model '{}'. Available models: {}",
                config.transcription.model,
                transcription::TranscriptionModel::available_ids().join(", ")
            )
        })?;
    Ok(transcription::TranscriptionConfig::new(
        model,
        credentials.require_deepgram()?.to_string(),
        config.transcription.options.clone(),
    ))
}

/// Builds the analysis stage config from file config and credentials.
fn analysis_config(
    config: &PitchgradeConfig,
    credentials: &Credentials,
) -> anyhow::Result<analysis::AnalysisConfig> {
    let model = analysis::AnalysisModel::from_id(&config.analysis.model).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown analysis model '{}'. Available models: {}",
            config.analysis.model,
            analysis::AnalysisModel::available_ids().join(", ")
        )
    })?;
    Ok(analysis::AnalysisConfig::new(
        model,
        credentials.require_openai()?.to_string(),
        config.analysis.temperature,
    ))
}
