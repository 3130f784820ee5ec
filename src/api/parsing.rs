use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::SummarizerError;
use crate::features::summarize::SummarizeForm;

/// Body accepted by the backend service.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Ready-made prompt from a client that built it itself.
    Prompt(String),
    /// Raw form; the service clamps, validates and builds the prompt.
    Form(SummarizeForm),
}

#[derive(Debug, Deserialize)]
struct PromptBody {
    prompt: String,
}

/// Returns the request body, decoding it when the gateway base64-encoded it.
///
/// # Errors
///
/// Returns `ValidationBlocked` when the body is missing, not a string, or not
/// valid base64/UTF-8.
pub fn extract_body(payload: &Value) -> Result<String, SummarizerError> {
    let Some(body) = payload.get("body") else {
        return Err(SummarizerError::ValidationBlocked("Missing body".to_string()));
    };
    let Some(body_str) = body.as_str() else {
        return Err(SummarizerError::ValidationBlocked(
            "Invalid body format".to_string(),
        ));
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(body_str.to_string());
    }

    let bytes = STANDARD
        .decode(body_str)
        .map_err(|e| SummarizerError::ValidationBlocked(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| SummarizerError::ValidationBlocked(format!("Body is not UTF-8: {e}")))
}

/// Parses a JSON body into a prompt or form request.
///
/// # Errors
///
/// Returns `ValidationBlocked` for invalid JSON, a body with neither `prompt`
/// nor `text`, or a blank prompt.
pub fn parse_request(body: &str) -> Result<ApiRequest, SummarizerError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| SummarizerError::ValidationBlocked(format!("Invalid JSON body: {e}")))?;

    if json.get("prompt").is_some() {
        let PromptBody { prompt } = serde_json::from_value(json).map_err(|e| {
            SummarizerError::ValidationBlocked(format!("Invalid prompt field: {e}"))
        })?;
        if prompt.trim().is_empty() {
            return Err(SummarizerError::ValidationBlocked(
                "Prompt must not be empty".to_string(),
            ));
        }
        return Ok(ApiRequest::Prompt(prompt));
    }

    if json.get("text").is_some() {
        let form: SummarizeForm = serde_json::from_value(json)
            .map_err(|e| SummarizerError::ValidationBlocked(format!("Invalid form body: {e}")))?;
        return Ok(ApiRequest::Form(form));
    }

    Err(SummarizerError::ValidationBlocked(
        "Body must contain 'prompt' or 'text'".to_string(),
    ))
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Extracts a bearer token from the `Authorization` header, if any.
pub fn bearer_token(payload: &Value) -> Option<&str> {
    let headers = payload.get("headers")?;
    let value = get_header_value(headers, "Authorization")?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}
