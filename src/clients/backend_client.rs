//! Intermediary summarization service client
//!
//! The service owns the provider key; we only send `{"prompt": ...}` and read
//! back `{"summary": ...}`.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};
use url::Url;

use super::SummaryBackend;
use crate::core::credential::Credential;
use crate::errors::SummarizerError;

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    prompt: &'a str,
}

pub struct ProxyBackend {
    http: Client,
    endpoint: Url,
}

impl ProxyBackend {
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SummarizerError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizerError::ConfigurationError(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self { http, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SummaryBackend for ProxyBackend {
    fn name(&self) -> &'static str {
        "proxy"
    }

    fn requires_credential(&self) -> bool {
        false
    }

    async fn generate(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> Result<String, SummarizerError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = credential {
            let value = HeaderValue::from_str(&format!("Bearer {}", key.expose())).map_err(|_| {
                SummarizerError::ConfigurationError(
                    "API key contains characters not allowed in a header".to_string(),
                )
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(headers)
            .json(&SummarizeRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!(
                "Summarization backend failed: status={} body={}",
                status, body_text
            );
            return Err(SummarizerError::TransportError(format!(
                "backend returned {status}: {body_text}"
            )));
        }

        let body: Value = response.json().await?;
        info!("Summarization backend responded with {}", status);

        extract_summary(&body)
    }
}

/// Pulls the `summary` string out of a backend response body.
///
/// # Errors
///
/// Returns `ResponseFormatError` when the field is missing, not a string, or blank.
pub fn extract_summary(body: &Value) -> Result<String, SummarizerError> {
    let Some(field) = body.get("summary") else {
        return Err(SummarizerError::ResponseFormatError(
            "Invalid response format from backend API: missing 'summary'.".to_string(),
        ));
    };
    let Some(summary) = field.as_str() else {
        return Err(SummarizerError::ResponseFormatError(
            "Invalid response format from backend API: 'summary' is not a string.".to_string(),
        ));
    };
    if summary.trim().is_empty() {
        return Err(SummarizerError::ResponseFormatError(
            "Empty summary returned from backend API.".to_string(),
        ));
    }
    Ok(summary.to_string())
}
