pub mod provider;
pub mod providers;

pub use provider::{Completion, CompletionProvider, FragmentStream, LlmError, Message, Role};
pub use providers::OllamaProvider;
