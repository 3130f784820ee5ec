use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Cannot submit: {0}")]
    ValidationBlocked(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Backend API error: {0}")]
    TransportError(String),

    #[error("Invalid response format: {0}")]
    ResponseFormatError(String),

    #[error("Speech synthesis failed: {0}")]
    SpeechError(String),
}

impl SummarizerError {
    /// HTTP status the backend service answers with for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SummarizerError::ValidationBlocked(_) => 400,
            SummarizerError::ConfigurationError(_) | SummarizerError::SpeechError(_) => 500,
            SummarizerError::TransportError(_) | SummarizerError::ResponseFormatError(_) => 502,
        }
    }
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return SummarizerError::ResponseFormatError(error.to_string());
        }
        if error.is_timeout() {
            return SummarizerError::TransportError(format!("request timed out: {error}"));
        }
        SummarizerError::TransportError(error.to_string())
    }
}

impl From<serde_json::Error> for SummarizerError {
    fn from(error: serde_json::Error) -> Self {
        SummarizerError::ResponseFormatError(error.to_string())
    }
}

impl From<url::ParseError> for SummarizerError {
    fn from(error: url::ParseError) -> Self {
        SummarizerError::ConfigurationError(format!("invalid URL: {error}"))
    }
}
