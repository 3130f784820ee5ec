use std::fmt;

use crate::core::models::SummaryOptions;

const PREAMBLE: &str = "You are an expert editor and summarizer. Summarize the user's text faithfully.

Objectives:
- Capture key points and important details.
- Remove fluff and redundancy.
- Do not add facts not present in the source text.";

const TEXT_HEADER: &str = "User's text:";

/// Instruction string sent to the summarization backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Wraps a prompt that was assembled by a remote client.
    #[must_use]
    pub fn from_raw(prompt: String) -> Self {
        Self(prompt)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Assembles the summarization instruction followed by the trimmed input text.
///
/// The output depends only on the arguments, so identical inputs always give
/// byte-identical prompts.
#[must_use]
pub fn build_prompt(text: &str, options: &SummaryOptions) -> Prompt {
    let mut constraints = vec![
        format!("- Tone: {}.", options.effective_tone()),
        format!(
            "- Format: {}. {}",
            options.format.label(),
            options.format.instruction()
        ),
        "- Keep it concise and readable on a mobile screen.".to_string(),
    ];
    if let Some(language) = options.effective_language() {
        constraints.push(format!("- Language: Write the summary in {language}."));
    }

    Prompt(format!(
        "{PREAMBLE}\n\nConstraints:\n{}\n\n{TEXT_HEADER}\n{}",
        constraints.join("\n"),
        text.trim()
    ))
}
