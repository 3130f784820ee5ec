//! Client modules for the summarization backends
//!
//! Both backends implement [`SummaryBackend`]; [`SummarizerClient`] owns the one
//! selected by configuration and applies the shared credential and response rules.

pub mod backend_client;
pub mod llm_client;

pub use backend_client::ProxyBackend;
pub use llm_client::LlmClient;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::{AppConfig, BackendKind};
use crate::core::credential::{Credential, require_credential, resolve_credential};
use crate::errors::SummarizerError;
use crate::prompt::Prompt;

/// A remote service that turns a prompt into summary text.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether a request without a credential must be refused before sending.
    fn requires_credential(&self) -> bool;

    /// Performs exactly one request and returns the raw summary text.
    async fn generate(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> Result<String, SummarizerError>;
}

/// Sends prompts to the configured backend and normalizes the result.
#[derive(Clone)]
pub struct SummarizerClient {
    backend: Arc<dyn SummaryBackend>,
    default_credential: Option<Credential>,
}

impl SummarizerClient {
    pub fn new(backend: Arc<dyn SummaryBackend>, default_credential: Option<Credential>) -> Self {
        Self {
            backend,
            default_credential,
        }
    }

    /// Builds the backend selected by `config.backend`.
    ///
    /// Only the direct provider gets the process-wide key. The proxy holds its
    /// own provider credential, so it only ever sees a key the caller supplies.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizerError> {
        let (backend, default_credential): (Arc<dyn SummaryBackend>, _) = match config.backend {
            BackendKind::Proxy => (
                Arc::new(ProxyBackend::new(
                    config.backend_url.clone(),
                    config.request_timeout,
                )?),
                None,
            ),
            BackendKind::Provider => (
                Arc::new(LlmClient::new(
                    config.provider_base_url.clone(),
                    config.openai_org_id.clone(),
                    config.openai_model.clone(),
                    config.request_timeout,
                )?),
                config.openai_api_key.clone(),
            ),
        };
        Ok(Self::new(backend, default_credential))
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Requests a summary for `prompt`. A non-blank `caller_credential` takes
    /// precedence over the process-wide key.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError` when the backend needs a key and none is available
    /// - `TransportError` when the call fails or returns a non-success status
    /// - `ResponseFormatError` when the payload has no usable summary
    pub async fn summarize(
        &self,
        prompt: &Prompt,
        caller_credential: Option<&str>,
    ) -> Result<String, SummarizerError> {
        let credential = if self.backend.requires_credential() {
            Some(require_credential(
                caller_credential,
                self.default_credential.as_ref(),
            )?)
        } else {
            resolve_credential(caller_credential, self.default_credential.as_ref())
        };

        info!(
            backend = self.backend.name(),
            prompt_chars = prompt.as_str().chars().count(),
            with_credential = credential.is_some(),
            "Requesting summary"
        );

        let raw = self
            .backend
            .generate(prompt.as_str(), credential.as_ref())
            .await
            .inspect_err(|e| warn!(backend = self.backend.name(), "Summary request failed: {}", e))?;

        let summary = raw.trim();
        if summary.is_empty() {
            warn!(backend = self.backend.name(), "Backend returned an empty summary");
            return Err(SummarizerError::ResponseFormatError(
                "Empty summary returned from backend API.".to_string(),
            ));
        }

        Ok(summary.to_string())
    }
}
