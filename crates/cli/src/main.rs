mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use condense_core::{load_dotenv, Config};
use condense_ingest::{extract_path, Chunker, ChunkerConfig};
use condense_llm::OllamaProvider;
use condense_pipeline::{PromptSet, Summarizer};

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let mut config = Config::from_env();

    let args = CliArgs::parse();

    // Flags beat environment.
    if let Some(model) = &args.model {
        config.ollama.model = model.clone();
    }
    if let Some(url) = &args.url {
        config.ollama.url = url.clone();
    }
    if let Some(max_chars) = args.max_chars {
        config.chunker.max_chars = max_chars;
    }
    if let Some(overlap_rate) = args.overlap_rate {
        config.chunker.overlap_rate = overlap_rate;
    }
    if let Some(prompts) = &args.prompts {
        config.prompts_file = prompts.clone();
    }
    config.log_summary();

    let prompts = PromptSet::load(&config.prompts_file)
        .context("failed to load instruction templates")?;

    let chunker = Chunker::new(ChunkerConfig {
        max_chars: config.chunker.max_chars,
        overlap_rate: config.chunker.overlap_rate,
    })
    .context("invalid chunker configuration")?;

    let document = extract_path(&args.file)
        .with_context(|| format!("failed to extract {}", args.file.display()))?;
    info!(
        file = %document.file_name,
        pages = document.page_count(),
        chars = document.total_chars(),
        "document extracted"
    );

    let provider = OllamaProvider::new(config.ollama.url.clone(), config.ollama.model.clone());
    let summarizer =
        Summarizer::new(&provider, &prompts, chunker).with_streaming(!args.no_stream);

    let mut stdout = std::io::stdout();
    let run = summarizer
        .run(&document.full_text(), args.questions, &mut stdout)
        .await
        .context("summarization failed")?;

    info!(chunks = run.chunk_count, "summarization complete");
    Ok(())
}
