//! Shared test doubles for the pipeline crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use condense_llm::{Completion, CompletionProvider, LlmError};
use futures::stream;

use crate::prompts::PromptSet;

pub(crate) fn prompt_set() -> PromptSet {
    PromptSet {
        summary: "summarize".to_string(),
        merge: "merge".to_string(),
        questions: "questions".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub system: String,
    pub user: String,
    pub stream: bool,
}

/// A completion backend that replays scripted responses in order and records
/// every request it receives. Streamed responses are split at word
/// boundaries so fragment handling gets exercised.
pub(crate) struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub(crate) fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn invoke(
        &self,
        system: &str,
        user: &str,
        stream: bool,
    ) -> Result<Completion, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
            stream,
        });
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();

        if stream {
            let fragments: Vec<Result<String, LlmError>> = next
                .split_inclusive(' ')
                .map(|s| Ok(s.to_string()))
                .collect();
            Ok(Completion::Streamed(Box::pin(stream::iter(fragments))))
        } else {
            Ok(Completion::Full(next))
        }
    }
}
