//! API Lambda handler for the summarization backend.
//!
//! Accepts `{"prompt": ...}` (or a raw form with `text`) and answers with
//! `{"summary": ...}` or `{"error": ...}`.

use super::{helpers, parsing};
use crate::clients::SummarizerClient;
use crate::core::config::{AppConfig, BackendKind};
use crate::errors::SummarizerError;
use crate::features::summarize::summarize_form;
use crate::prompt::Prompt;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// Always talks to the provider directly with the server-held key.
///
/// # Errors
///
/// Returns an error only when the configuration cannot be loaded; request
/// problems become HTTP error payloads.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let mut config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e.to_string())
    })?;
    config.backend = BackendKind::Provider;

    let client = match SummarizerClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build summarizer client: {}", e);
            return Ok(helpers::error_from(&e));
        }
    };

    Ok(handle_request(&client, &config, &event.payload).await)
}

/// Processes one gateway event with an already-built client.
pub async fn handle_request(
    client: &SummarizerClient,
    config: &AppConfig,
    payload: &Value,
) -> Value {
    let request_id = Uuid::new_v4();
    let span = info_span!("api_request", %request_id);

    async {
        match process(client, config, payload).await {
            Ok(summary) => {
                info!("Returning summary");
                helpers::ok_summary(&summary)
            }
            Err(e) => {
                error!("Request failed: {}", e);
                helpers::error_from(&e)
            }
        }
    }
    .instrument(span)
    .await
}

async fn process(
    client: &SummarizerClient,
    config: &AppConfig,
    payload: &Value,
) -> Result<String, SummarizerError> {
    let body = parsing::extract_body(payload)?;
    let caller_key = parsing::bearer_token(payload);

    match parsing::parse_request(&body)? {
        parsing::ApiRequest::Prompt(prompt) => {
            info!(prompt_chars = prompt.chars().count(), "Prompt request");
            client.summarize(&Prompt::from_raw(prompt), caller_key).await
        }
        parsing::ApiRequest::Form(mut form) => {
            info!("Form request");
            if form.api_key.is_none() {
                form.api_key = caller_key.map(str::to_string);
            }
            if !config.language_enabled {
                form.options.language = None;
            }
            summarize_form(client, &form, config.word_limit).await
        }
    }
}
