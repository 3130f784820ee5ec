use std::fmt;

use crate::errors::SummarizerError;

/// API key for the summarization backend. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a non-blank secret; blank input yields `None`.
    #[must_use]
    pub fn new(secret: &str) -> Option<Self> {
        let secret = secret.trim();
        if secret.is_empty() {
            None
        } else {
            Some(Self(secret.to_string()))
        }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Picks the credential for one request: the caller's own key wins over the
/// process-wide key loaded at startup.
#[must_use]
pub fn resolve_credential(
    caller_supplied: Option<&str>,
    process_wide: Option<&Credential>,
) -> Option<Credential> {
    caller_supplied
        .and_then(Credential::new)
        .or_else(|| process_wide.cloned())
}

/// Like [`resolve_credential`], but missing credentials are a configuration error.
///
/// # Errors
///
/// Returns `ConfigurationError` when neither source yields a usable key.
pub fn require_credential(
    caller_supplied: Option<&str>,
    process_wide: Option<&Credential>,
) -> Result<Credential, SummarizerError> {
    resolve_credential(caller_supplied, process_wide).ok_or_else(|| {
        SummarizerError::ConfigurationError(
            "No API key provided. Enter your API key or set OPENAI_API_KEY.".to_string(),
        )
    })
}
