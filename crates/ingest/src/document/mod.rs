//! Document text extraction.
//!
//! Reads a document from disk and produces per-page text, dispatching by
//! file extension: PDF (via `pdf-extract`) and plain text / markdown.

mod pdf;
mod txt;

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of extracted text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number (for PDFs). For TXT/MD, always 1.
    pub page_number: usize,
    /// The extracted text content.
    pub text: String,
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename (no directory components).
    pub file_name: String,
    /// Extracted pages in order.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// All page text concatenated with blank-line separators.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }
}

/// Extract text from a document on disk, dispatching by file extension.
pub fn extract_path(path: &Path) -> Result<ExtractedDocument, ExtractionError> {
    if !path.exists() {
        return Err(ExtractionError::FileNotFound(path.to_path_buf()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let bytes = std::fs::read(path)?;

    let pages = match ext.as_str() {
        "pdf" => pdf::extract_pdf(&bytes)?,
        "txt" | "text" | "md" | "markdown" => txt::extract_txt(&bytes),
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    tracing::debug!(file = %file_name, pages = pages.len(), "extracted document");

    Ok(ExtractedDocument { file_name, pages })
}
