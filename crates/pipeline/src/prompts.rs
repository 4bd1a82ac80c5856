//! Instruction templates steering the completion backend per stage.
//!
//! Loaded once at process start; a missing or malformed file is a startup
//! failure, never a per-call one.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read prompt file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed prompt file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct PromptEntry {
    content: String,
}

#[derive(Debug, Deserialize)]
struct PromptFile {
    summary: PromptEntry,
    merge: PromptEntry,
    questions: PromptEntry,
}

/// The named system instructions, one per pipeline stage.
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub summary: String,
    pub merge: String,
    pub questions: String,
}

impl PromptSet {
    /// Load instructions from a JSON file of the form
    /// `{"summary": {"content": "..."}, "merge": ..., "questions": ...}`.
    pub fn load(path: &Path) -> Result<Self, PromptError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PromptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: PromptFile =
            serde_json::from_str(&raw).map_err(|source| PromptError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            summary: file.summary.content,
            merge: file.merge.content,
            questions: file.questions.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_well_formed_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(
            br#"{
                "summary": {"content": "Summarize this."},
                "merge": {"content": "Merge these."},
                "questions": {"content": "Ask about this."}
            }"#,
        )
        .unwrap();
        let prompts = PromptSet::load(f.path()).unwrap();
        assert_eq!(prompts.summary, "Summarize this.");
        assert_eq!(prompts.merge, "Merge these.");
        assert_eq!(prompts.questions, "Ask about this.");
    }

    #[test]
    fn missing_file_fails_loudly() {
        let err = PromptSet::load(Path::new("/no/such/prompts.json")).unwrap_err();
        assert!(matches!(err, PromptError::Io { .. }));
    }

    #[test]
    fn missing_instruction_is_malformed() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"{"summary": {"content": "only one"}}"#).unwrap();
        let err = PromptSet::load(f.path()).unwrap_err();
        assert!(matches!(err, PromptError::Parse { .. }));
    }
}
