//! Display recent log entries from the application.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::logging;

const DEFAULT_LINES: usize = 50;

/// Shows the tail of the most recent log file.
///
/// # Errors
/// - If the log directory cannot be determined
/// - If log files cannot be read
pub fn handle_logs(lines: Option<usize>) -> Result<(), anyhow::Error> {
    let line_count = lines.unwrap_or(DEFAULT_LINES);
    let log_dir = logging::log_dir()?;

    let Some(log_file) = find_latest_log(&log_dir)? else {
        println!("No log files found in: {}", log_dir.display());
        println!("Run 'pitchgrade' on a recording to generate logs.");
        return Ok(());
    };

    let content = fs::read_to_string(&log_file)
        .map_err(|e| anyhow!("Failed to read log file: {e}"))?;

    if content.is_empty() {
        println!("Log file is empty: {}", log_file.display());
        return Ok(());
    }

    let all_lines: Vec<&str> = content.lines().collect();
    let start_index = all_lines.len().saturating_sub(line_count);

    if start_index > 0 {
        println!("Showing last {} of {} lines:", line_count, all_lines.len());
    } else {
        println!("Showing all {} lines:", all_lines.len());
    }
    println!("Full log file at: {}", log_file.display());
    println!();

    for line in &all_lines[start_index..] {
        println!("{line}");
    }

    Ok(())
}

/// Finds the most recently modified log file in the directory, if any.
fn find_latest_log(log_dir: &Path) -> Result<Option<PathBuf>, anyhow::Error> {
    let entries = fs::read_dir(log_dir)
        .map_err(|e| anyhow!("Failed to read log directory: {e}"))?;

    let mut latest: Option<(PathBuf, std::time::SystemTime)> = None;

    for entry in entries {
        let path = entry
            .map_err(|e| anyhow!("Failed to read directory entry: {e}"))?
            .path();

        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains("pitchgrade.log"));
        if !is_log {
            continue;
        }

        if let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) {
            let newer = latest.as_ref().map(|(_, t)| modified > *t).unwrap_or(true);
            if newer {
                latest = Some((path, modified));
            }
        }
    }

    Ok(latest.map(|(path, _)| path))
}
