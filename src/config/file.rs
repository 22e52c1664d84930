//! Configuration file management for pitchgrade.
//!
//! Handles loading and saving application configuration from TOML files.
//! Configuration is stored in the user's config directory and written with
//! defaults on first run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Deepgram formatting options forwarded as query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepgramOptions {
    /// Add punctuation and capitalization
    #[serde(default)]
    pub punctuate: bool,
    /// Apply smart formatting to the transcript
    #[serde(default)]
    pub smart_format: bool,
    /// Include filler words in the transcript (uh, um, etc.)
    #[serde(default)]
    pub filler_words: bool,
    /// Convert numbers from written to numerical format
    #[serde(default)]
    pub numerals: bool,
    /// Apply profanity filtering
    #[serde(default)]
    pub profanity_filter: bool,
    /// Enable automatic language detection
    #[serde(default = "default_true")]
    pub detect_language: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DeepgramOptions {
    fn default() -> Self {
        Self {
            punctuate: false,
            smart_format: false,
            filler_words: false,
            numerals: false,
            profanity_filter: false,
            detect_language: true,
        }
    }
}

/// Transcription settings: which Deepgram model to use and how the
/// transcript should be formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionSection {
    /// Transcription model id (see `pitchgrade --help` for the list)
    #[serde(default = "default_transcription_model")]
    pub model: String,
    #[serde(flatten)]
    pub options: DeepgramOptions,
}

fn default_transcription_model() -> String {
    "nova-3".to_string()
}

impl Default for TranscriptionSection {
    fn default() -> Self {
        Self {
            model: default_transcription_model(),
            options: DeepgramOptions::default(),
        }
    }
}

/// Analysis settings: which chat model grades the pitch and how much the
/// generation is allowed to wander.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Analysis model id
    #[serde(default = "default_analysis_model")]
    pub model: String,
    /// Sampling temperature for the feedback generation
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_analysis_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            model: default_analysis_model(),
            temperature: default_temperature(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PitchgradeConfig {
    #[serde(default)]
    pub transcription: TranscriptionSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
}

impl PitchgradeConfig {
    /// Loads configuration from the user's config directory, writing the
    /// default config file first if none exists yet.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the config file cannot be read or written
    /// - If the TOML is malformed
    pub fn load_or_init() -> anyhow::Result<Self> {
        let config_path = config_file_path()?;
        if !config_path.exists() {
            let config = PitchgradeConfig::default();
            config.save()?;
            tracing::info!("Wrote default configuration to {}", config_path.display());
            return Ok(config);
        }
        let config_content = fs::read_to_string(&config_path)?;
        let config: PitchgradeConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Saves configuration to the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the file cannot be written
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = config_file_path()?;
        let config_content = toml::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        tracing::info!("Configuration saved");
        Ok(())
    }
}

/// Retrieves the path to the config file, creating the config directory if
/// needed.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn config_file_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    let config_dir = home.join(".config").join("pitchgrade");
    fs::create_dir_all(&config_dir)?;
    Ok(config_dir.join("pitchgrade.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_parses_to_defaults() {
        let config: PitchgradeConfig = toml::from_str("").unwrap();
        assert_eq!(config.transcription.model, "nova-3");
        assert!(config.transcription.options.detect_language);
        assert!(!config.transcription.options.punctuate);
        assert_eq!(config.analysis.model, "gpt-4");
        assert_eq!(config.analysis.temperature, 0.7);
    }

    #[test]
    fn sections_override_independently() {
        let config: PitchgradeConfig = toml::from_str(
            r#"
            [transcription]
            model = "nova-2"
            punctuate = true

            [analysis]
            temperature = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.transcription.model, "nova-2");
        assert!(config.transcription.options.punctuate);
        assert_eq!(config.analysis.model, "gpt-4");
        assert_eq!(config.analysis.temperature, 0.2);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let rendered = toml::to_string_pretty(&PitchgradeConfig::default()).unwrap();
        let parsed: PitchgradeConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.transcription.model, "nova-3");
        assert_eq!(parsed.analysis.model, "gpt-4");
    }
}
