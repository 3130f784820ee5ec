//! Response builders for the Lambda proxy integration.

use serde_json::{Value, json};

use crate::errors::SummarizerError;

/// Returns a 200 OK response carrying the summary.
#[must_use]
pub fn ok_summary(summary: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "summary": summary }).to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "error": message }).to_string()
    })
}

/// Maps a pipeline error onto its HTTP status and message.
#[must_use]
pub fn error_from(err: &SummarizerError) -> Value {
    err_response(err.status_code(), &err.to_string())
}
