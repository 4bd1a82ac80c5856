pub mod chunker;
pub mod document;

pub use chunker::{Chunk, Chunker, ChunkerConfig, ChunkingError};
pub use document::{extract_path, ExtractedDocument, ExtractionError, PageContent};
