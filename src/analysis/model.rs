//! Analysis model definitions and metadata.
//!
//! Defines the supported OpenAI chat models used to grade a pitch
//! transcript, mirroring the shape of the transcription model table.

use serde::{Deserialize, Serialize};

/// Represents a supported analysis model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisModel {
    /// GPT-4 (default, most thorough feedback)
    Gpt4,
    /// GPT-4o (faster, multimodal generation)
    Gpt4o,
    /// GPT-4o Mini (fastest, cheapest)
    Gpt4oMini,
}

impl AnalysisModel {
    /// Returns the model identifier as a string
    pub fn id(&self) -> &'static str {
        match self {
            AnalysisModel::Gpt4 => "gpt-4",
            AnalysisModel::Gpt4o => "gpt-4o",
            AnalysisModel::Gpt4oMini => "gpt-4o-mini",
        }
    }

    /// Returns a human-readable description of the model
    pub fn description(&self) -> &'static str {
        match self {
            AnalysisModel::Gpt4 => "GPT-4 (most thorough feedback)",
            AnalysisModel::Gpt4o => "GPT-4o (faster)",
            AnalysisModel::Gpt4oMini => "GPT-4o Mini (fastest, cheapest)",
        }
    }

    /// Returns the API endpoint for this model
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisModel::Gpt4 | AnalysisModel::Gpt4o | AnalysisModel::Gpt4oMini => {
                "https://api.openai.com/v1/chat/completions"
            }
        }
    }

    /// Returns the model name to send to the API
    pub fn api_model_name(&self) -> &'static str {
        self.id()
    }

    /// Parses a model ID string into an AnalysisModel
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "gpt-4" => Some(AnalysisModel::Gpt4),
            "gpt-4o" => Some(AnalysisModel::Gpt4o),
            "gpt-4o-mini" => Some(AnalysisModel::Gpt4oMini),
            _ => None,
        }
    }

    /// Returns all available models
    pub fn all() -> &'static [Self] {
        &[
            AnalysisModel::Gpt4,
            AnalysisModel::Gpt4o,
            AnalysisModel::Gpt4oMini,
        ]
    }

    /// Returns all available model IDs
    pub fn available_ids() -> Vec<&'static str> {
        Self::all().iter().map(|m| m.id()).collect()
    }
}

impl Default for AnalysisModel {
    fn default() -> Self {
        AnalysisModel::Gpt4
    }
}
