//! Configuration management for pitchgrade.
//!
//! Application settings live in a TOML file in the user's config directory.
//! API credentials are deliberately not stored there: they are read from
//! the process environment once at startup and handed explicitly to the
//! service clients.

pub mod credentials;
pub mod file;

pub use credentials::Credentials;
pub use file::{config_file_path, AnalysisSection, DeepgramOptions, PitchgradeConfig, TranscriptionSection};
