use condense_llm::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
    #[error("completion returned no text for {0}")]
    EmptyOutput(&'static str),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("failed to write to output sink: {0}")]
    Sink(#[from] std::io::Error),
}
