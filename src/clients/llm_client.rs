//! LLM (OpenAI) API client module
//!
//! Calls an OpenAI-compatible Responses endpoint directly with the resolved key.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{error, info};
use url::Url;

use super::SummaryBackend;
use crate::core::credential::Credential;
use crate::errors::SummarizerError;

const MAX_OUTPUT_TOKENS: usize = 4_000;

pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// LLM API client for generating summaries
pub struct LlmClient {
    http: Client,
    base_url: Url,
    org_id: Option<String>,
    model_name: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the HTTP client cannot be built.
    pub fn new(
        base_url: Url,
        org_id: Option<String>,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizerError::ConfigurationError(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            http,
            base_url,
            org_id,
            model_name,
        })
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.as_str().trim_end_matches('/'))
    }

    fn headers(&self, credential: &Credential) -> Result<HeaderMap, SummarizerError> {
        let invalid = |what: &str| {
            SummarizerError::ConfigurationError(format!(
                "{what} contains characters not allowed in a header"
            ))
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
                .map_err(|_| invalid("API key"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(org) = &self.org_id {
            headers.insert(
                HeaderName::from_static("openai-organization"),
                HeaderValue::from_str(org).map_err(|_| invalid("Organization id"))?,
            );
        }
        Ok(headers)
    }
}

#[async_trait]
impl SummaryBackend for LlmClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn requires_credential(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> Result<String, SummarizerError> {
        let credential = credential.ok_or_else(|| {
            SummarizerError::ConfigurationError("No API key provided.".to_string())
        })?;

        #[cfg(feature = "debug-logs")]
        info!("Using summarization prompt:\n{}", prompt);

        info!(
            model = %self.model_name,
            estimated_input_tokens = estimate_tokens(prompt),
            "Generating summary"
        );

        let request_body = json!({
            "model": self.model_name,
            "input": [{ "role": "user", "content": prompt }],
            "max_output_tokens": MAX_OUTPUT_TOKENS
        });

        let response = self
            .http
            .post(self.responses_url())
            .headers(self.headers(credential)?)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                SummarizerError::TransportError(format!("OpenAI API request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("OpenAI API error: status={} body={}", status, error_text);
            return Err(SummarizerError::TransportError(format!(
                "OpenAI API returned {status}: {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizerError::ResponseFormatError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        extract_output_text(&response_json).ok_or_else(|| {
            SummarizerError::ResponseFormatError("No text in OpenAI response".to_string())
        })
    }
}

/// Reads `output_text`, falling back to joining every `output_text` part of
/// `output[].content[]`.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let mut collected: Vec<String> = Vec::new();
    if let Some(items) = response_json.get("output").and_then(Value::as_array) {
        for item in items {
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for p in parts {
                let is_output_text = p
                    .get("type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| t == "output_text");
                if !is_output_text {
                    continue;
                }
                if let Some(s) = p.get("text").and_then(Value::as_str) {
                    collected.push(s.to_string());
                } else if let Some(s) = p
                    .get("text")
                    .and_then(|t| t.get("value"))
                    .and_then(Value::as_str)
                {
                    collected.push(s.to_string());
                }
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}
