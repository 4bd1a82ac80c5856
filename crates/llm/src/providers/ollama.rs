use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::{self, Stream};
use serde_json::{json, Value};
use tracing::debug;

use crate::provider::{Completion, CompletionProvider, FragmentStream, LlmError, Message, Role};

/// Ollama chat backend (`/api/chat`), streaming or whole-body.
pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            model,
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    async fn invoke(
        &self,
        system: &str,
        user: &str,
        stream: bool,
    ) -> Result<Completion, LlmError> {
        let url = format!("{}/api/chat", self.url);

        let messages = [
            Message {
                role: Role::System,
                content: system.to_string(),
            },
            Message {
                role: Role::User,
                content: user.to_string(),
            },
        ];
        let api_messages: Vec<Value> = messages
            .iter()
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::System => "system",
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    "content": m.content,
                })
            })
            .collect();

        let body = json!({
            "model": self.model,
            "messages": api_messages,
            "stream": stream,
        });

        debug!(model = %self.model, stream, "Ollama request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        if stream {
            Ok(Completion::Streamed(ndjson_fragments(response)))
        } else {
            let resp: Value = response.json().await?;
            let content = resp["message"]["content"]
                .as_str()
                .ok_or_else(|| LlmError::Parse("missing message.content".into()))?
                .to_string();
            Ok(Completion::Full(content))
        }
    }
}

// ── NDJSON stream decoding ──────────────────────────────────────────

/// What a single response line contributes to the fragment stream.
enum LineEvent {
    /// Blank line, or a fragment with no text to emit.
    Skip,
    Fragment { text: String, done: bool },
    Fail(LlmError),
}

/// Decode one NDJSON line of an `/api/chat` streaming response.
fn line_event(line: &str) -> LineEvent {
    if line.is_empty() {
        return LineEvent::Skip;
    }
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return LineEvent::Fail(LlmError::Parse(format!("bad stream line: {e}"))),
    };
    if let Some(message) = value["error"].as_str() {
        return LineEvent::Fail(LlmError::Stream(message.to_string()));
    }
    LineEvent::Fragment {
        text: value["message"]["content"].as_str().unwrap_or("").to_string(),
        done: value["done"].as_bool().unwrap_or(false),
    }
}

/// Turn a streaming response body into text fragments, one per NDJSON line,
/// ending at the `done: true` marker.
fn ndjson_fragments(response: reqwest::Response) -> FragmentStream {
    type ByteStream = Pin<Box<dyn Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send>>;

    struct State {
        bytes: ByteStream,
        buffer: String,
        finished: bool,
    }

    let state = State {
        bytes: Box::pin(response.bytes_stream()),
        buffer: String::new(),
        finished: false,
    };

    let fragments = stream::unfold(state, |mut state| async move {
        use futures::StreamExt;
        loop {
            if state.finished {
                return None;
            }

            // Consume complete lines already buffered.
            if let Some(pos) = state.buffer.find('\n') {
                let line: String = state.buffer.drain(..=pos).collect();
                match line_event(line.trim()) {
                    LineEvent::Skip => continue,
                    LineEvent::Fragment { text, done } => {
                        state.finished = done;
                        if text.is_empty() {
                            if done {
                                return None;
                            }
                            continue;
                        }
                        return Some((Ok(text), state));
                    }
                    LineEvent::Fail(err) => {
                        state.finished = true;
                        return Some((Err(err), state));
                    }
                }
            }

            // Need more bytes.
            match state.bytes.next().await {
                Some(Ok(chunk)) => state.buffer.push_str(&String::from_utf8_lossy(&chunk)),
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(LlmError::Http(e)), state));
                }
                None => {
                    // Transport ended; flush a trailing line without newline.
                    let line = std::mem::take(&mut state.buffer);
                    state.finished = true;
                    match line_event(line.trim()) {
                        LineEvent::Fragment { text, .. } if !text.is_empty() => {
                            return Some((Ok(text), state));
                        }
                        LineEvent::Fail(err) => return Some((Err(err), state)),
                        _ => return None,
                    }
                }
            }
        }
    });

    Box::pin(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_content_fragment() {
        let line = r#"{"model":"m","message":{"role":"assistant","content":"Hello"},"done":false}"#;
        match line_event(line) {
            LineEvent::Fragment { text, done } => {
                assert_eq!(text, "Hello");
                assert!(!done);
            }
            _ => panic!("expected fragment"),
        }
    }

    #[test]
    fn decodes_done_marker() {
        let line = r#"{"model":"m","message":{"role":"assistant","content":""},"done":true}"#;
        match line_event(line) {
            LineEvent::Fragment { text, done } => {
                assert_eq!(text, "");
                assert!(done);
            }
            _ => panic!("expected fragment"),
        }
    }

    #[test]
    fn surfaces_in_stream_error_object() {
        let line = r#"{"error":"model not found"}"#;
        assert!(matches!(
            line_event(line),
            LineEvent::Fail(LlmError::Stream(ref m)) if m == "model not found"
        ));
    }

    #[test]
    fn rejects_garbage_lines() {
        assert!(matches!(
            line_event("not json at all"),
            LineEvent::Fail(LlmError::Parse(_))
        ));
    }

    #[test]
    fn skips_blank_lines() {
        assert!(matches!(line_event(""), LineEvent::Skip));
    }
}
