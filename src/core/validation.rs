use super::models::SummaryOptions;
use super::words::count_words;
use crate::errors::SummarizerError;

/// Outcome of the pre-submit check. `reason` is empty when not blocked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitCheck {
    pub blocked: bool,
    pub reason: String,
}

impl SubmitCheck {
    fn allowed() -> Self {
        Self::default()
    }

    fn blocked(reason: String) -> Self {
        Self {
            blocked: true,
            reason,
        }
    }

    /// # Errors
    ///
    /// Returns `ValidationBlocked` carrying the reason when the check blocked.
    pub fn into_result(self) -> Result<(), SummarizerError> {
        if self.blocked {
            Err(SummarizerError::ValidationBlocked(self.reason))
        } else {
            Ok(())
        }
    }
}

/// Decides whether the form may be submitted. The first failing rule wins.
#[must_use]
pub fn can_submit(text: &str, options: &SummaryOptions, word_limit: usize) -> SubmitCheck {
    if text.trim().is_empty() {
        return SubmitCheck::blocked(format!("Please add some text (≤ {word_limit} words)."));
    }
    if count_words(text) > word_limit {
        return SubmitCheck::blocked(format!(
            "Your input exceeds {word_limit} words. Please shorten it."
        ));
    }
    if options.tone.is_custom() && options.custom_tone.trim().is_empty() {
        return SubmitCheck::blocked("Custom tone can't be empty.".to_string());
    }
    if options.language.is_some_and(|lang| lang.is_custom())
        && options.custom_language.trim().is_empty()
    {
        return SubmitCheck::blocked("Custom language can't be empty.".to_string());
    }
    SubmitCheck::allowed()
}
