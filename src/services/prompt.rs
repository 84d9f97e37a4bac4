use crate::constants::{SUMMARY_INSTRUCTIONS, SUMMARY_TEXT_DELIMITER};
use crate::models::ChatMessage;

/// Build the prompt asking for a Mermaid `graph TD` summary. The text is
/// appended verbatim after the delimiter line.
pub fn build_summary_prompt(text: &str) -> String {
    format!("{}{}\n{}", SUMMARY_INSTRUCTIONS, SUMMARY_TEXT_DELIMITER, text)
}

pub fn build_summary_messages(text: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(build_summary_prompt(text))]
}
