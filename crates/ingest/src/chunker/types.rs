//! Chunker configuration and output types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChunkingError {
    #[error("overlap rate must be strictly between 0 and 1, got {0}")]
    InvalidOverlapRate(f64),
    #[error("max chars per chunk must be positive")]
    InvalidMaxChars,
}

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Maximum characters per chunk (default: 4000).
    pub max_chars: usize,
    /// Fraction of each buffer carried into the next chunk (default: 0.1).
    /// Must be strictly between 0 and 1.
    pub overlap_rate: f64,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chars: 4000,
            overlap_rate: 0.1,
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A bounded segment of source text with paragraph-aligned boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based position within the document.
    pub index: usize,
    /// The chunk text, trimmed of surrounding whitespace.
    pub text: String,
    /// Character count of the untrimmed buffer this chunk was emitted from.
    pub char_count: usize,
}
