//! Article summaries: model first, extractive fallback.
//!
//! Provider bodies carry a `[+1234 chars]` truncation marker which is
//! stripped before anything else looks at the text. When no model is
//! configured, or every attempt fails, the first three sentences of the
//! article stand in for the summary.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::AskAsync;
use crate::utils::truncate_for_log;

static TRUNCATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\+\d+ chars\]").expect("valid truncation marker regex"));
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence break regex"));

const FALLBACK_SENTENCES: usize = 3;
pub const NO_SUMMARY_MESSAGE: &str =
    "Unable to generate summary due to limited content. Please refer to the original article.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("No text provided for summarization")]
    EmptyText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    Model,
    Extractive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub source: SummarySource,
}

/// Remove provider truncation markers such as `[+2310 chars]`.
pub fn clean_article_text(text: &str) -> String {
    TRUNCATION_MARKER.replace_all(text, "").into_owned()
}

pub fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following news article in 3-4 sentences. Make it concise and informative:\n\n{text}"
    )
}

/// First three sentences joined with `". "`, ending in a period.
pub fn extractive_summary(text: &str) -> String {
    let summary = SENTENCE_BREAK
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .take(FALLBACK_SENTENCES)
        .collect::<Vec<_>>()
        .join(". ");

    if summary.is_empty() {
        NO_SUMMARY_MESSAGE.to_string()
    } else if summary.ends_with('.') {
        summary
    } else {
        summary + "."
    }
}

/// Summarize `text` with `model` when given, falling back to the
/// extractive summary on any failure.
#[instrument(level = "info", skip_all, fields(chars = text.len()))]
pub async fn summarize<A>(model: Option<&A>, text: &str) -> Result<Summary, SummarizeError>
where
    A: AskAsync<Response = String>,
{
    let cleaned = clean_article_text(text);
    if cleaned.trim().is_empty() {
        return Err(SummarizeError::EmptyText);
    }

    if let Some(model) = model {
        match model.ask(&summary_prompt(&cleaned)).await {
            Ok(reply) => {
                info!(preview = %truncate_for_log(&reply, 120), "Model summary generated");
                return Ok(Summary {
                    text: reply.trim().to_string(),
                    source: SummarySource::Model,
                });
            }
            Err(e) => warn!(error = %e, "Model summary failed; using extractive fallback"),
        }
    } else {
        info!("No summarizer key configured; using extractive fallback");
    }

    Ok(Summary {
        text: extractive_summary(&cleaned),
        source: SummarySource::Extractive,
    })
}
