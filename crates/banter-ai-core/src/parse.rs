//! Line-based reply parser
//!
//! The model is asked for a fixed `ANALYSIS:` / `SUGGESTION n:` layout, but
//! its output is free text and drifts. This module is the only place that
//! knows the layout; callers get a [`ParsedReply`] and decide what a missing
//! analysis means.

/// Marker opening the analysis line
const ANALYSIS_MARKER: &str = "ANALYSIS:";

/// Prefix opening each suggestion line
const SUGGESTION_MARKER: &str = "SUGGESTION";

/// Structured fields extracted from a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Text after the `ANALYSIS:` marker; `None` when no such line exists
    pub analysis: Option<String>,
    /// Suggestion texts in reply order, capped at the entitled count
    pub suggestions: Vec<String>,
}

/// Scan a reply line by line.
///
/// - A line beginning with `ANALYSIS:` sets the analysis (a later one wins).
/// - A line beginning with `SUGGESTION` contributes the text after its first
///   colon, trimmed; a marker line with no colon contributes whole.
/// - Every other line is ignored.
/// - Suggestions are truncated to `max_suggestions`.
pub fn parse_reply(raw: &str, max_suggestions: usize) -> ParsedReply {
    let mut analysis = None;
    let mut suggestions = Vec::new();

    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix(ANALYSIS_MARKER) {
            analysis = Some(rest.trim().to_string());
        } else if line.starts_with(SUGGESTION_MARKER) {
            let text = match line.split_once(':') {
                Some((_, rest)) => rest.trim(),
                None => line,
            };
            suggestions.push(text.to_string());
        }
    }

    suggestions.truncate(max_suggestions);

    ParsedReply {
        analysis,
        suggestions,
    }
}
