use std::path::PathBuf;

use clap::Parser;

/// Summarize a long document through a local LLM.
///
/// Splits the document into overlapping chunks, summarizes each chunk
/// independently, merges the chunk summaries into one summary, and
/// optionally generates follow-up questions from it.
#[derive(Parser, Debug)]
#[command(name = "condense", about = "Summarize long documents with a local LLM")]
pub struct CliArgs {
    /// Document to summarize (.pdf, .txt, or .md)
    pub file: PathBuf,

    /// Model name override (default from OLLAMA_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Ollama base URL override (default from OLLAMA_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Maximum characters per chunk
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Fraction of each chunk carried into the next, strictly between 0 and 1
    #[arg(long)]
    pub overlap_rate: Option<f64>,

    /// Instruction template file override
    #[arg(long)]
    pub prompts: Option<PathBuf>,

    /// Generate follow-up questions after the summary
    #[arg(long)]
    pub questions: bool,

    /// Request whole-body completions instead of streamed fragments
    #[arg(long)]
    pub no_stream: bool,
}
