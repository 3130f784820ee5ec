use serde::{Deserialize, Serialize};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::clients::SummarizerClient;
use crate::core::models::SummaryOptions;
use crate::core::validation::can_submit;
use crate::core::words::ClampedInput;
use crate::errors::SummarizerError;
use crate::prompt::{Prompt, build_prompt};

/// One submission from the shell: the raw editor text plus the chosen options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeForm {
    pub text: String,
    #[serde(default)]
    pub options: SummaryOptions,
    /// Caller-supplied key; skipped when serializing.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

/// Clamped input and the prompt built from it.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub input: ClampedInput,
    pub prompt: Prompt,
}

/// Clamps the text, runs the submit check and builds the prompt.
///
/// # Errors
///
/// Returns `ValidationBlocked` with the user-facing reason when the form
/// cannot be submitted.
pub fn prepare_request(
    form: &SummarizeForm,
    word_limit: usize,
) -> Result<PreparedRequest, SummarizerError> {
    let input = ClampedInput::new(&form.text, word_limit);
    if input.truncated {
        info!(word_limit, "Input truncated to word limit");
    }

    can_submit(&input.text, &form.options, word_limit).into_result()?;

    let prompt = build_prompt(&input.text, &form.options);
    Ok(PreparedRequest { input, prompt })
}

/// Runs the whole pipeline for one submission and returns the trimmed summary.
///
/// # Errors
///
/// Any [`SummarizerError`] from validation or from the backend call.
pub async fn summarize_form(
    client: &SummarizerClient,
    form: &SummarizeForm,
    word_limit: usize,
) -> Result<String, SummarizerError> {
    let correlation_id = Uuid::new_v4();
    let span = info_span!("summarize", %correlation_id, backend = client.backend_name());

    async {
        let prepared = prepare_request(form, word_limit)?;
        info!(
            words = prepared.input.word_count,
            format = %form.options.format,
            tone = %form.options.tone,
            "Submitting summarization request"
        );
        let summary = client
            .summarize(&prepared.prompt, form.api_key.as_deref())
            .await?;
        info!(summary_chars = summary.chars().count(), "Summary received");
        Ok::<_, SummarizerError>(summary)
    }
    .instrument(span)
    .await
}
