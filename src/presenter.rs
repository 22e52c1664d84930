//! Terminal presentation of the transcript and the coaching feedback.
//!
//! Content passes through untransformed: what the services returned is what
//! gets rendered. Only the section headers are styled.

use console::style;

use crate::clipboard::copy_to_clipboard;

/// Prints the transcript section.
pub fn print_transcript(transcript: &str) {
    println!();
    println!("{}", style("Transcript").bold().underlined());
    println!();
    println!("{transcript}");
}

/// Prints the feedback section.
pub fn print_feedback(feedback: &str) {
    println!();
    println!("{}", style("Feedback").bold().underlined());
    println!();
    println!("{feedback}");
}

/// Renders the plain-text report used for file and clipboard delivery.
pub fn render_report(transcript: &str, feedback: &str) -> String {
    format!("Transcript\n----------\n{transcript}\n\nFeedback\n--------\n{feedback}\n")
}

/// Routes final text to its destination: output file beats clipboard beats
/// stdout.
///
/// # Errors
/// - If the output file cannot be written
pub fn deliver(text: &str, clipboard: bool, output_file: Option<&str>) -> anyhow::Result<()> {
    if let Some(file_path) = output_file {
        std::fs::write(file_path, text)
            .map_err(|e| anyhow::anyhow!("Failed to write to file '{file_path}': {e}"))?;
        tracing::debug!("Output written to file: {file_path}");
    } else if clipboard {
        if let Err(e) = copy_to_clipboard(text) {
            tracing::warn!("Failed to copy to clipboard: {e}");
        } else {
            tracing::debug!("Output copied to clipboard");
        }
    } else {
        println!("{text}");
        tracing::debug!("Output printed to stdout");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_contains_both_sections_verbatim() {
        let report = render_report("Hello, I'd like to show you our product.", "Great pitch!");
        assert!(report.contains("Hello, I'd like to show you our product."));
        assert!(report.contains("Great pitch!"));
        assert!(report.find("Transcript").unwrap() < report.find("Feedback").unwrap());
    }
}
