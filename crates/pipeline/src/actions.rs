//! The pipeline operations: per-chunk summarization, summary merging, and
//! question generation, each delegating text generation to an injected
//! [`CompletionProvider`].
//!
//! `merge_summaries` and `generate_questions` hand back the undrained
//! response so the caller can stream it to a display sink as it arrives;
//! `summarize_chunk` drains internally since per-chunk output is not shown.

use std::io::Write;

use condense_llm::{Completion, CompletionProvider};

use crate::error::PipelineError;
use crate::prompts::PromptSet;

/// Summarize a single chunk and return the trimmed summary text.
pub async fn summarize_chunk(
    provider: &dyn CompletionProvider,
    prompts: &PromptSet,
    text: &str,
    stream: bool,
) -> Result<String, PipelineError> {
    if text.trim().is_empty() {
        return Err(PipelineError::EmptyInput("chunk text"));
    }

    let completion = provider.invoke(&prompts.summary, text, stream).await?;
    let summary = completion.collect().await?;

    if summary.trim().is_empty() {
        return Err(PipelineError::EmptyOutput("chunk summary"));
    }
    Ok(summary.trim().to_string())
}

/// Merge chunk summaries into one response. Returns the handle undrained.
pub async fn merge_summaries(
    provider: &dyn CompletionProvider,
    prompts: &PromptSet,
    summaries: &[String],
    stream: bool,
) -> Result<Completion, PipelineError> {
    if summaries.is_empty() {
        return Err(PipelineError::EmptyInput("summaries"));
    }

    let joined = summaries.join("\n\n");
    Ok(provider.invoke(&prompts.merge, &joined, stream).await?)
}

/// Generate follow-up questions from a summary. Returns the handle undrained.
pub async fn generate_questions(
    provider: &dyn CompletionProvider,
    prompts: &PromptSet,
    summary: &str,
    stream: bool,
) -> Result<Completion, PipelineError> {
    if summary.trim().is_empty() {
        return Err(PipelineError::EmptyInput("summary"));
    }

    Ok(provider.invoke(&prompts.questions, summary, stream).await?)
}

/// Consume a completion fragment by fragment, writing each to `out` as it
/// arrives (flushed for real-time display), and return the trimmed whole.
pub async fn drain_to_sink(
    completion: Completion,
    out: &mut dyn Write,
) -> Result<String, PipelineError> {
    match completion {
        Completion::Full(text) => {
            out.write_all(text.as_bytes())?;
            out.flush()?;
            Ok(text.trim().to_string())
        }
        Completion::Streamed(mut fragments) => {
            use futures::StreamExt;
            let mut full = String::new();
            while let Some(fragment) = fragments.next().await {
                let fragment = fragment?;
                out.write_all(fragment.as_bytes())?;
                out.flush()?;
                full.push_str(&fragment);
            }
            Ok(full.trim().to_string())
        }
    }
}
