//! The coaching prompt sent to the analysis model.
//!
//! One fixed template with a single substitution point: the transcript is
//! appended verbatim at the end. The rubric asks for six category scores,
//! a letter grade, per-category feedback, and three recommendations.

/// Instructions placed ahead of the transcript in the user message.
const COACHING_RUBRIC: &str = "\
You are a sales pitch coach. A salesperson has submitted the transcript of their pitch below.
Evaluate it across the following 6 categories (1-10 scale):
1. Clarity and confidence
2. Structure and flow
3. Communication of value
4. Personalization
5. Objection handling (if applicable)
6. Call to action

Provide a score for each, a final letter grade (A+ to F), and 2-3 sentences of feedback per category.
End with 3 specific, constructive recommendations for improvement.";

/// Builds the coaching prompt for a transcript.
///
/// The transcript is included verbatim; callers are expected to have
/// checked it is non-empty before asking for feedback on it.
pub fn build_coaching_prompt(transcript: &str) -> String {
    format!("{COACHING_RUBRIC}\n\nTranscript:\n{transcript}\n")
}
