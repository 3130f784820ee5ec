use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Default word budget for a single summarization request.
pub const DEFAULT_WORD_LIMIT: usize = 1000;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("static word pattern"));

/// Counts Unicode word tokens. Punctuation-only runs are not words.
#[must_use]
pub fn count_words(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    WORD_RE.find_iter(text).count()
}

/// Truncates `text` to its first `limit` words.
///
/// Text already within the budget is returned untouched. Over-budget text is
/// rebuilt from the matched words joined by single spaces, so the original
/// whitespace and punctuation between words are lost.
#[must_use]
pub fn clamp_to_word_limit(text: &str, limit: usize) -> Cow<'_, str> {
    if text.is_empty() {
        return Cow::Borrowed("");
    }

    let words: Vec<&str> = WORD_RE.find_iter(text).map(|m| m.as_str()).collect();
    if words.len() <= limit {
        return Cow::Borrowed(text);
    }

    Cow::Owned(words[..limit].join(" "))
}

/// Input text after clamping, with the numbers the shell shows next to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClampedInput {
    pub text: String,
    pub word_count: usize,
    pub limit: usize,
    pub truncated: bool,
}

impl ClampedInput {
    #[must_use]
    pub fn new(raw: &str, limit: usize) -> Self {
        let clamped = clamp_to_word_limit(raw, limit);
        let truncated = matches!(clamped, Cow::Owned(_));
        let text = clamped.into_owned();
        let word_count = count_words(&text);

        Self {
            text,
            word_count,
            limit,
            truncated,
        }
    }

    /// Counter label, e.g. `Words: 12/1000`.
    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("Words: {}/{}", self.word_count, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_unicode_words_and_skips_punctuation() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  ...  !!! --- "), 0);
        assert_eq!(count_words("Hello, world!"), 2);
        assert_eq!(count_words("naïve café déjà-vu"), 4);
        assert_eq!(count_words("東京 は 大きい"), 3);
    }

    #[test]
    fn clamp_within_budget_borrows_original() {
        let text = "one,  two\n\tthree.";
        let clamped = clamp_to_word_limit(text, 3);
        assert!(matches!(clamped, Cow::Borrowed(_)));
        assert_eq!(clamped, text);
    }

    #[test]
    fn clamp_over_budget_rejoins_with_single_spaces() {
        let clamped = clamp_to_word_limit("alpha,\n\nbeta;  gamma delta", 3);
        assert_eq!(clamped, "alpha beta gamma");
    }

    #[test]
    fn clamp_to_zero_drops_everything() {
        assert_eq!(clamp_to_word_limit("a b", 0), "");
    }

    #[test]
    fn clamped_input_reports_truncation() {
        let input = ClampedInput::new("a b c d e", 2);
        assert!(input.truncated);
        assert_eq!(input.text, "a b");
        assert_eq!(input.word_count, 2);
        assert_eq!(input.counter_label(), "Words: 2/2");

        let untouched = ClampedInput::new("a b", 2);
        assert!(!untouched.truncated);
        assert_eq!(untouched.text, "a b");
    }
}
