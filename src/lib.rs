//! Summarizer - turns up to a thousand words of text into a faithful summary.
//!
//! The crate holds the request pipeline shared by two entry points:
//! 1. `alwrity-summarize`, a command-line shell that reads text, checks it,
//!    requests a summary and can read the result aloud
//! 2. `summarizer-api`, an AWS Lambda backend that accepts `{"prompt": ...}`
//!    and answers `{"summary": ...}` using a server-held provider key
//!
//! # Pipeline
//!
//! - [`core::words`] clamps the text to the word budget
//! - [`core::validation`] decides whether the form may be submitted
//! - [`prompt`] assembles the instruction string
//! - [`clients`] sends it to the configured backend
//!
//! # Example
//!
//! ```no_run
//! use summarizer::clients::SummarizerClient;
//! use summarizer::core::config::AppConfig;
//! use summarizer::core::models::{SummaryFormat, SummaryOptions, Tone};
//! use summarizer::features::summarize::{SummarizeForm, summarize_form};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     summarizer::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let client = SummarizerClient::from_config(&config)?;
//!
//!     let form = SummarizeForm {
//!         text: "Rust is a systems language focused on safety and speed.".into(),
//!         options: SummaryOptions {
//!             format: SummaryFormat::BulletPoints,
//!             tone: Tone::Casual,
//!             ..SummaryOptions::default()
//!         },
//!         api_key: None,
//!     };
//!
//!     let summary = summarize_form(&client, &form, config.word_limit).await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod features;
pub mod prompt;
pub mod session;
pub mod speech;

pub use clients::llm_client::estimate_tokens;
pub use errors::SummarizerError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called at the start of each Lambda
/// handler.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

/// Human-readable logs on stderr for the command-line shell, filtered by
/// `RUST_LOG` (default `warn`) so stdout carries only the summary.
pub fn setup_cli_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
