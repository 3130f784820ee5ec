//! Summarization backend service (AWS Lambda)
//!
//! Implements the intermediary side of the wire contract: the request body is
//! `{"prompt": ...}` and the response body `{"summary": ...}`. The provider key
//! stays on the server.

pub mod handler;
pub mod helpers;
pub mod parsing;

// Re-export the main handler for convenience
pub use handler::handler;
