use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> f64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ollama: OllamaConfig,
    pub chunker: ChunkerSettings,
    /// Path to the instruction template file (JSON).
    pub prompts_file: PathBuf,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            ollama: OllamaConfig::from_env(),
            chunker: ChunkerSettings::from_env(),
            prompts_file: PathBuf::from(env_or("CONDENSE_PROMPTS", "config/prompts.json")),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  ollama:   url={}, model={}", self.ollama.url, self.ollama.model);
        tracing::info!(
            "  chunker:  max_chars={}, overlap_rate={}",
            self.chunker.max_chars,
            self.chunker.overlap_rate
        );
        tracing::info!("  prompts:  {}", self.prompts_file.display());
    }
}

// ── Ollama ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

impl OllamaConfig {
    fn from_env() -> Self {
        Self {
            url: env_or("OLLAMA_URL", "http://localhost:11434"),
            model: env_or("OLLAMA_MODEL", "phi3:mini"),
        }
    }
}

// ── Chunker ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerSettings {
    /// Maximum characters per chunk.
    pub max_chars: usize,
    /// Fraction of a chunk carried into the next one.
    pub overlap_rate: f64,
}

impl ChunkerSettings {
    fn from_env() -> Self {
        Self {
            max_chars: env_usize("CONDENSE_MAX_CHARS", 4000),
            overlap_rate: env_f64("CONDENSE_OVERLAP_RATE", 0.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_env_unset() {
        // Fresh keys nothing else sets, so no cross-test interference.
        assert_eq!(env_usize("CONDENSE_TEST_UNSET_USIZE", 4000), 4000);
        assert_eq!(env_f64("CONDENSE_TEST_UNSET_F64", 0.1), 0.1);
        assert_eq!(env_or("CONDENSE_TEST_UNSET_STR", "fallback"), "fallback");
    }

    #[test]
    fn garbage_numeric_env_falls_back() {
        env::set_var("CONDENSE_TEST_BAD_USIZE", "not-a-number");
        assert_eq!(env_usize("CONDENSE_TEST_BAD_USIZE", 7), 7);
        env::remove_var("CONDENSE_TEST_BAD_USIZE");
    }
}
