//! Sequential summarization pipeline: chunk, summarize each chunk, merge,
//! and optionally generate follow-up questions.

use std::io::Write;

use condense_ingest::Chunker;
use condense_llm::CompletionProvider;
use tracing::info;

use crate::actions::{drain_to_sink, generate_questions, merge_summaries, summarize_chunk};
use crate::error::PipelineError;
use crate::prompts::PromptSet;

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub struct SummaryRun {
    pub chunk_count: usize,
    pub summary: String,
    pub questions: Option<String>,
}

/// Orchestrates one document through the pipeline. Chunks are summarized
/// one at a time in index order; the merged summary (and the optional
/// question set) is streamed to the display sink as it is generated.
pub struct Summarizer<'a> {
    provider: &'a dyn CompletionProvider,
    prompts: &'a PromptSet,
    chunker: Chunker,
    stream: bool,
}

impl<'a> Summarizer<'a> {
    pub fn new(
        provider: &'a dyn CompletionProvider,
        prompts: &'a PromptSet,
        chunker: Chunker,
    ) -> Self {
        Self {
            provider,
            prompts,
            chunker,
            stream: true,
        }
    }

    /// Request whole-body completions from the backend instead of fragment
    /// streams. Output still goes to the sink, just all at once.
    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Run the pipeline over `text`, writing generated output to `out`.
    ///
    /// Fails fast with `EmptyInput` before any backend call when the text
    /// chunks to nothing. Aborts on the first error; anything already
    /// written to `out` stays there.
    pub async fn run(
        &self,
        text: &str,
        questions: bool,
        out: &mut dyn Write,
    ) -> Result<SummaryRun, PipelineError> {
        let chunks = self.chunker.chunk(text).unwrap_or_default();
        if chunks.is_empty() {
            return Err(PipelineError::EmptyInput("document text"));
        }
        info!(chunks = chunks.len(), "document chunked");

        let mut summaries = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            info!(
                chunk = chunk.index + 1,
                total = chunks.len(),
                chars = chunk.char_count,
                "summarizing chunk"
            );
            let summary =
                summarize_chunk(self.provider, self.prompts, &chunk.text, self.stream).await?;
            summaries.push(summary);
        }

        info!(count = summaries.len(), "merging chunk summaries");
        let merged = merge_summaries(self.provider, self.prompts, &summaries, self.stream).await?;
        let summary = drain_to_sink(merged, out).await?;
        out.write_all(b"\n")?;
        if summary.is_empty() {
            return Err(PipelineError::EmptyOutput("merged summary"));
        }

        let question_set = if questions {
            info!("generating follow-up questions");
            let handle =
                generate_questions(self.provider, self.prompts, &summary, self.stream).await?;
            out.write_all(b"\n")?;
            let drained = drain_to_sink(handle, out).await?;
            out.write_all(b"\n")?;
            Some(drained)
        } else {
            None
        };

        Ok(SummaryRun {
            chunk_count: chunks.len(),
            summary,
            questions: question_set,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{prompt_set, ScriptedProvider};
    use condense_ingest::ChunkerConfig;

    fn chunker(max_chars: usize) -> Chunker {
        Chunker::new(ChunkerConfig {
            max_chars,
            overlap_rate: 0.1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn runs_chunk_summarize_merge_in_order() {
        // Two paragraphs that cannot share a 40-char chunk.
        let text = format!("{}\n{}", "a".repeat(30), "b".repeat(30));
        let provider = ScriptedProvider::new(vec!["first summary", "second summary", "merged"]);
        let prompts = prompt_set();
        let summarizer = Summarizer::new(&provider, &prompts, chunker(40));

        let mut sink: Vec<u8> = Vec::new();
        let run = summarizer.run(&text, false, &mut sink).await.unwrap();

        assert_eq!(run.chunk_count, 2);
        assert_eq!(run.summary, "merged");
        assert_eq!(run.questions, None);
        assert_eq!(String::from_utf8(sink).unwrap(), "merged\n");

        let calls = provider.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].system, prompts.summary);
        assert_eq!(calls[1].system, prompts.summary);
        assert_eq!(calls[2].system, prompts.merge);
        assert_eq!(calls[2].user, "first summary\n\nsecond summary");
    }

    #[tokio::test]
    async fn question_stage_runs_after_merge() {
        let provider =
            ScriptedProvider::new(vec!["summary", "merged", "Q1?\nQ2?"]);
        let prompts = prompt_set();
        let summarizer = Summarizer::new(&provider, &prompts, chunker(4000));

        let mut sink: Vec<u8> = Vec::new();
        let run = summarizer
            .run("One modest paragraph.", true, &mut sink)
            .await
            .unwrap();

        assert_eq!(run.questions.as_deref(), Some("Q1?\nQ2?"));
        let calls = provider.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].system, prompts.questions);
        assert_eq!(calls[2].user, "merged");
        assert_eq!(String::from_utf8(sink).unwrap(), "merged\n\nQ1?\nQ2?\n");
    }

    #[tokio::test]
    async fn empty_document_fails_before_any_backend_call() {
        let provider = ScriptedProvider::new(vec!["never used"]);
        let prompts = prompt_set();
        let summarizer = Summarizer::new(&provider, &prompts, chunker(4000));

        let mut sink: Vec<u8> = Vec::new();
        for text in ["", "  \n \n  "] {
            let err = summarizer.run(text, false, &mut sink).await.unwrap_err();
            assert!(matches!(err, PipelineError::EmptyInput("document text")));
        }
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn whole_body_mode_is_passed_through() {
        let provider = ScriptedProvider::new(vec!["summary", "merged"]);
        let prompts = prompt_set();
        let summarizer =
            Summarizer::new(&provider, &prompts, chunker(4000)).with_streaming(false);

        let mut sink: Vec<u8> = Vec::new();
        summarizer
            .run("A paragraph.", false, &mut sink)
            .await
            .unwrap();
        assert!(provider.calls().iter().all(|c| !c.stream));
    }
}
