//! Clipboard utilities for pitchgrade.
//!
//! Copies text to the system clipboard via pbcopy (macOS), wl-copy
//! (Wayland), or xclip (X11), whichever is available first.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

/// Copies text to the system clipboard.
///
/// Clipboard availability is best-effort: when no tool can be found a
/// warning is logged and the call still succeeds, so analysis output is
/// never lost to a missing clipboard helper.
pub fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let candidates: &[(&str, &[&str])] = if cfg!(target_os = "macos") {
        &[("pbcopy", &[])]
    } else {
        &[
            ("wl-copy", &["--type", "text/plain", "--trim-newline"]),
            ("xclip", &["-selection", "clipboard", "-in", "-quiet"]),
        ]
    };

    for (tool, args) in candidates {
        if pipe_to(tool, args, text) {
            tracing::debug!("Text copied to clipboard via {tool}");
            return Ok(());
        }
    }

    tracing::warn!("No clipboard tool available");
    Ok(())
}

/// Spawns `tool` and writes `text` to its stdin. Returns false when the
/// tool is missing or the write fails.
fn pipe_to(tool: &str, args: &[&str], text: &str) -> bool {
    let Ok(mut child) = Command::new(tool).args(args).stdin(Stdio::piped()).spawn() else {
        tracing::debug!("{tool} not found or not executable");
        return false;
    };
    let Some(mut stdin) = child.stdin.take() else {
        return false;
    };
    match write!(stdin, "{text}") {
        Ok(()) => {
            drop(stdin);
            // Give the tool a moment to take ownership of the selection
            thread::sleep(Duration::from_millis(100));
            true
        }
        Err(e) => {
            tracing::warn!("Failed to write to {tool} stdin: {e}");
            false
        }
    }
}
