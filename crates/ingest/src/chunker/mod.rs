//! Paragraph-preserving chunking engine.
//!
//! Splits document text into size-bounded chunks, packing whole paragraphs
//! and carrying a raw tail of each buffer into the next chunk so downstream
//! summarization keeps context across cut points.

mod helpers;
mod types;

use helpers::{char_len, split_paragraphs, tail_chars};

pub use types::{Chunk, ChunkerConfig, ChunkingError};


/// The chunking engine. Built once from a validated [`ChunkerConfig`];
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct Chunker {
    max_chars: usize,
    overlap_chars: usize,
}

impl Chunker {
    /// Validate the configuration and fix the overlap width.
    pub fn new(config: ChunkerConfig) -> Result<Self, ChunkingError> {
        if !(config.overlap_rate > 0.0 && config.overlap_rate < 1.0) {
            return Err(ChunkingError::InvalidOverlapRate(config.overlap_rate));
        }
        if config.max_chars == 0 {
            return Err(ChunkingError::InvalidMaxChars);
        }
        Ok(Self {
            max_chars: config.max_chars,
            overlap_chars: (config.max_chars as f64 * config.overlap_rate).floor() as usize,
        })
    }

    /// Characters of each buffer carried into the next chunk.
    pub fn overlap_chars(&self) -> usize {
        self.overlap_chars
    }

    /// Split `text` into ordered, overlapping chunks.
    ///
    /// Returns `None` for empty input (nothing to do), and an empty vec when
    /// the input held no non-whitespace paragraphs. A single paragraph longer
    /// than `max_chars` is never split; it overflows its chunk instead.
    pub fn chunk(&self, text: &str) -> Option<Vec<Chunk>> {
        if text.is_empty() {
            return None;
        }

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut buffer = String::new();

        for para in split_paragraphs(text) {
            if char_len(&buffer) + char_len(&para) <= self.max_chars {
                buffer.push_str(&para);
            } else {
                if !buffer.trim().is_empty() {
                    chunks.push(make_chunk(chunks.len(), &buffer));
                }
                // Seed the next buffer with the raw tail of the old one, then
                // the paragraph that did not fit. The tail is untrimmed and
                // may include the paragraph separator.
                let overlap = tail_chars(&buffer, self.overlap_chars).to_string();
                buffer = overlap;
                buffer.push_str(&para);
            }
        }

        if !buffer.trim().is_empty() {
            chunks.push(make_chunk(chunks.len(), &buffer));
        }

        Some(chunks)
    }
}

fn make_chunk(index: usize, buffer: &str) -> Chunk {
    Chunk {
        index,
        text: buffer.trim().to_string(),
        // Counted before the trim. The count describes the buffer the chunk
        // was cut from, not the stored text.
        char_count: char_len(buffer),
    }
}
