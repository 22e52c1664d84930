//! Application command handlers for pitchgrade.
//!
//! This module organizes command handling into separate submodules, each
//! responsible for a specific application command.
//!
//! # Commands
//! - `analyze`: Full pipeline — transcribe a recorded pitch, then request
//!   coaching feedback (the default command)
//! - `transcribe`: Transcription stage only, transcript to stdout for piping
//! - `config`: Open configuration file in user's preferred editor
//! - `logs`: Display recent log entries

pub mod analyze;
pub mod config;
pub mod logs;
pub mod transcribe;

pub use analyze::handle_analyze;
pub use config::handle_config;
pub use logs::handle_logs;
pub use transcribe::handle_transcribe;
