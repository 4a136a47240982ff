//! Fixed prompt templates
//!
//! The reply format the coaching prompt requests is what `parse` scans for;
//! keep the two in sync when changing either.

use std::fmt::Write;

/// The user turn sent alongside the coaching system prompt
pub const COACHING_TRIGGER: &str = "Please provide your analysis and suggestions.";

/// System prompt for image pre-analysis
pub const VISION_SYSTEM: &str = "\
You are analyzing an image to help understand social context.
This could be:
- A screenshot of a text conversation
- A social media post/story
- A photo someone shared
- A profile picture

Extract all visible text, describe the visual content, and identify any emotional tone or context.
Be concise but thorough.";

/// Build the coaching system prompt embedding the conversation context, the
/// desired tone, the goal, and the entitled suggestion count.
pub fn coaching_prompt(context: &str, tone: &str, goal: &str, suggestion_count: usize) -> String {
    let mut prompt = format!(
        "You are a social skills coach helping users improve their communication.\n\
         \n\
         Current Conversation Context: {context}\n\
         \n\
         User's Desired Tone: {tone}\n\
         User's Goal: {goal}\n\
         \n\
         Provide:\n\
         1. A brief analysis of the current situation (2-3 sentences)\n\
         2. {suggestion_count} different response suggestions that match the desired tone and achieve the goal\n\
         3. Brief explanation for each suggestion (1 sentence)\n\
         \n\
         Format your response as:\n\
         ANALYSIS: [your analysis]\n"
    );

    for i in 1..=suggestion_count {
        // write! into a String cannot fail
        let _ = writeln!(prompt, "SUGGESTION {i}: [response] - [reason]");
    }

    prompt
}

/// Build the user turn for image pre-analysis, appending the caller's hint
/// when present.
pub fn vision_prompt(hint: Option<&str>) -> String {
    let mut prompt = String::from(
        "Analyze this image and extract all text, describe the content, \
         and identify any social context or emotional tone.",
    );

    if let Some(hint) = hint {
        let _ = write!(prompt, "\n\nAdditional context provided by user: {hint}");
    }

    prompt
}
