//! Audio ingress: supported encodings and input sources.
//!
//! The analyzer accepts a recorded pitch either as a file path or piped on
//! stdin. Piped audio is spooled to a named temp file so the transcription
//! client can treat both cases identically; the spool file is deleted as
//! soon as the `AudioSource` is dropped, which callers do right after the
//! transcription call completes.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tempfile::NamedTempFile;

/// Audio encodings the transcription endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    M4a,
}

impl AudioFormat {
    /// Determines the encoding from a file extension (case-insensitive).
    ///
    /// # Errors
    /// - If the path has no extension or the extension is not a supported
    ///   audio encoding
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| {
                anyhow!(
                    "Cannot determine audio format of '{}'. Supported formats: wav, mp3, m4a",
                    path.display()
                )
            })?;
        Self::from_id(&ext).ok_or_else(|| {
            anyhow!("Unsupported audio format '.{ext}'. Supported formats: wav, mp3, m4a")
        })
    }

    /// Resolves the `--format` flag used for stdin input. Defaults to WAV,
    /// matching the most common pitch-recording format.
    pub fn from_flag(flag: Option<&str>) -> anyhow::Result<Self> {
        match flag {
            Some(id) => Self::from_id(id).ok_or_else(|| {
                anyhow!("Unsupported audio format '{id}'. Supported formats: wav, mp3, m4a")
            }),
            None => Ok(AudioFormat::Wav),
        }
    }

    /// Parses a format identifier ("wav", "mp3", "m4a").
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            "m4a" => Some(AudioFormat::M4a),
            _ => None,
        }
    }

    /// File extension for this encoding, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
        }
    }

    /// Content type declared to the transcription endpoint.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::M4a => "audio/mp4",
        }
    }
}

/// A recorded pitch ready for transcription.
///
/// Either a caller-owned file on disk, or bytes piped on stdin spooled to a
/// temp file owned by this value. Dropping a spooled source removes the
/// temp file.
pub enum AudioSource {
    File { path: PathBuf, format: AudioFormat },
    Spooled { file: NamedTempFile, format: AudioFormat },
}

impl AudioSource {
    /// Opens the audio input named on the command line.
    ///
    /// A path of `-` reads stdin; `stdin_format` names the encoding of the
    /// piped bytes since there is no file extension to inspect.
    ///
    /// # Errors
    /// - If the file does not exist or has an unsupported extension
    /// - If stdin cannot be read or spooled to disk
    pub fn open(path: &Path, stdin_format: AudioFormat) -> anyhow::Result<Self> {
        if path.as_os_str() == "-" {
            return Self::spool(&mut std::io::stdin().lock(), stdin_format);
        }

        if !path.exists() {
            return Err(anyhow!("Audio file not found: {}", path.display()));
        }
        let format = AudioFormat::from_path(path)?;
        Ok(AudioSource::File {
            path: path.to_path_buf(),
            format,
        })
    }

    /// Spools a byte stream to a temp file carrying the right extension.
    pub fn spool(reader: &mut impl Read, format: AudioFormat) -> anyhow::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("pitchgrade-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile()
            .map_err(|e| anyhow!("Failed to create spool file for piped audio: {e}"))?;

        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| anyhow!("Failed to read piped audio: {e}"))?;
        if buf.is_empty() {
            return Err(anyhow!("No audio received on stdin"));
        }
        file.write_all(&buf)
            .map_err(|e| anyhow!("Failed to spool piped audio to disk: {e}"))?;
        file.flush()
            .map_err(|e| anyhow!("Failed to flush spooled audio: {e}"))?;

        tracing::debug!(
            "Spooled {} bytes of piped audio to {}",
            buf.len(),
            file.path().display()
        );

        Ok(AudioSource::Spooled { file, format })
    }

    /// Path to the audio bytes on disk.
    pub fn path(&self) -> &Path {
        match self {
            AudioSource::File { path, .. } => path,
            AudioSource::Spooled { file, .. } => file.path(),
        }
    }

    /// The audio encoding of this source.
    pub fn format(&self) -> AudioFormat {
        match self {
            AudioSource::File { format, .. } | AudioSource::Spooled { format, .. } => *format,
        }
    }
}
