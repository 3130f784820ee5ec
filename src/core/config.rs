use std::env;
use std::time::Duration;
use url::Url;

use super::credential::Credential;
use super::words::DEFAULT_WORD_LIMIT;
use crate::errors::SummarizerError;

pub const DEFAULT_BACKEND_URL: &str = "https://api.alwrity.com/summarize";
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where summaries come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Intermediary HTTP service that holds the provider key itself.
    Proxy,
    /// Managed LLM provider called directly with our credential.
    Provider,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proxy" | "backend" => Ok(BackendKind::Proxy),
            "provider" | "direct" | "openai" => Ok(BackendKind::Provider),
            other => Err(format!("unknown backend kind: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub backend_url: Url,
    pub provider_base_url: Url,
    pub openai_api_key: Option<Credential>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub word_limit: usize,
    pub language_enabled: bool,
    pub request_timeout: Duration,
    pub tts_command: Option<String>,
    pub tts_voice_flag: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Proxy,
            backend_url: Url::parse(DEFAULT_BACKEND_URL).expect("static backend URL"),
            provider_base_url: Url::parse(DEFAULT_PROVIDER_BASE_URL)
                .expect("static provider URL"),
            openai_api_key: None,
            openai_org_id: None,
            openai_model: DEFAULT_MODEL.to_string(),
            word_limit: DEFAULT_WORD_LIMIT,
            language_enabled: true,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tts_command: None,
            tts_voice_flag: None,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for malformed values. Missing variables fall
    /// back to defaults; a missing API key is only an error once a request needs it.
    pub fn from_env() -> Result<Self, SummarizerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for malformed values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SummarizerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let backend = match var("SUMMARIZER_BACKEND") {
            Some(raw) => raw
                .parse()
                .map_err(|e| SummarizerError::ConfigurationError(format!("SUMMARIZER_BACKEND: {e}")))?,
            None => defaults.backend,
        };

        let backend_url = match var("ALWRITY_BACKEND_URL") {
            Some(raw) => Url::parse(&raw).map_err(|e| {
                SummarizerError::ConfigurationError(format!("ALWRITY_BACKEND_URL: {e}"))
            })?,
            None => defaults.backend_url,
        };

        let provider_base_url = match var("OPENAI_BASE_URL") {
            Some(raw) => Url::parse(&raw).map_err(|e| {
                SummarizerError::ConfigurationError(format!("OPENAI_BASE_URL: {e}"))
            })?,
            None => defaults.provider_base_url,
        };

        let word_limit = match var("SUMMARIZER_WORD_LIMIT") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                SummarizerError::ConfigurationError(format!("SUMMARIZER_WORD_LIMIT: {e}"))
            })?,
            None => defaults.word_limit,
        };

        let language_enabled = match var("SUMMARIZER_LANGUAGE") {
            Some(raw) => parse_switch(&raw).ok_or_else(|| {
                SummarizerError::ConfigurationError(format!(
                    "SUMMARIZER_LANGUAGE: expected on/off, got {raw}"
                ))
            })?,
            None => defaults.language_enabled,
        };

        let request_timeout = match var("SUMMARIZER_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    SummarizerError::ConfigurationError(format!("SUMMARIZER_TIMEOUT_SECS: {e}"))
                })?;
                if secs == 0 {
                    return Err(SummarizerError::ConfigurationError(
                        "SUMMARIZER_TIMEOUT_SECS must be at least 1".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            backend,
            backend_url,
            provider_base_url,
            openai_api_key: var("OPENAI_API_KEY").as_deref().and_then(Credential::new),
            openai_org_id: var("OPENAI_ORG_ID"),
            openai_model: var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            word_limit,
            language_enabled,
            request_timeout,
            tts_command: var("TTS_COMMAND"),
            tts_voice_flag: var("TTS_VOICE_FLAG"),
        })
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}
