//! Transcription model definitions and metadata.
//!
//! Defines the supported Deepgram speech-to-text models with their
//! identifiers, API endpoints, and API model names.

use serde::{Deserialize, Serialize};

/// Represents a supported transcription model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranscriptionModel {
    /// Deepgram Nova 3 model (latest, fastest)
    Nova3,
    /// Deepgram Nova 2 model (previous generation)
    Nova2,
}

impl TranscriptionModel {
    /// Returns the model identifier as a string
    pub fn id(&self) -> &'static str {
        match self {
            TranscriptionModel::Nova3 => "nova-3",
            TranscriptionModel::Nova2 => "nova-2",
        }
    }

    /// Returns a human-readable description of the model
    pub fn description(&self) -> &'static str {
        match self {
            TranscriptionModel::Nova3 => "Nova 3 (latest, fastest)",
            TranscriptionModel::Nova2 => "Nova 2 (previous generation)",
        }
    }

    /// Returns the API endpoint for this model
    pub fn endpoint(&self) -> &'static str {
        match self {
            TranscriptionModel::Nova3 | TranscriptionModel::Nova2 => {
                "https://api.deepgram.com/v1/listen"
            }
        }
    }

    /// Returns the model name to send to the API
    pub fn api_model_name(&self) -> &'static str {
        self.id()
    }

    /// Parses a model ID string into a TranscriptionModel
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "nova-3" => Some(TranscriptionModel::Nova3),
            "nova-2" => Some(TranscriptionModel::Nova2),
            _ => None,
        }
    }

    /// Returns all available models
    pub fn all() -> &'static [Self] {
        &[TranscriptionModel::Nova3, TranscriptionModel::Nova2]
    }

    /// Returns all available model IDs
    pub fn available_ids() -> Vec<&'static str> {
        Self::all().iter().map(|m| m.id()).collect()
    }
}

impl Default for TranscriptionModel {
    fn default() -> Self {
        TranscriptionModel::Nova3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_is_rejected() {
        assert!(TranscriptionModel::from_id("whisper-1").is_none());
        assert_eq!(
            TranscriptionModel::from_id("nova-3"),
            Some(TranscriptionModel::Nova3)
        );
    }

    #[test]
    fn all_models_point_at_the_listen_endpoint() {
        for model in TranscriptionModel::all() {
            assert!(model.endpoint().ends_with("/v1/listen"));
        }
    }
}
