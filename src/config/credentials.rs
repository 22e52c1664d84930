//! Service credentials, read from the process environment.
//!
//! The two API keys are loaded once at startup and passed explicitly into
//! the client configurations. Nothing here reads the environment again
//! later, and nothing is written to disk.

use anyhow::anyhow;

/// Environment variable holding the Deepgram API key.
pub const DEEPGRAM_API_KEY_VAR: &str = "DEEPGRAM_API_KEY";

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// API keys for the two external services.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub deepgram_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    /// Reads both keys from the process environment. Unset and empty
    /// variables are treated the same.
    pub fn from_env() -> Self {
        Self {
            deepgram_api_key: read_var(DEEPGRAM_API_KEY_VAR),
            openai_api_key: read_var(OPENAI_API_KEY_VAR),
        }
    }

    /// Returns the Deepgram key or an error naming the variable to set.
    pub fn require_deepgram(&self) -> anyhow::Result<&str> {
        self.deepgram_api_key.as_deref().ok_or_else(|| {
            anyhow!("No Deepgram API key found. Set the {DEEPGRAM_API_KEY_VAR} environment variable.")
        })
    }

    /// Returns the OpenAI key or an error naming the variable to set.
    pub fn require_openai(&self) -> anyhow::Result<&str> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            anyhow!("No OpenAI API key found. Set the {OPENAI_API_KEY_VAR} environment variable.")
        })
    }
}

fn read_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_error_names_the_variable() {
        let creds = Credentials::default();
        let err = creds.require_deepgram().unwrap_err();
        assert!(err.to_string().contains("DEEPGRAM_API_KEY"));
        let err = creds.require_openai().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn present_keys_are_returned() {
        let creds = Credentials {
            deepgram_api_key: Some("dg-key".to_string()),
            openai_api_key: Some("oa-key".to_string()),
        };
        assert_eq!(creds.require_deepgram().unwrap(), "dg-key");
        assert_eq!(creds.require_openai().unwrap(), "oa-key");
    }
}
