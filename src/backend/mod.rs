//! Language-model backends.

pub mod error;
pub mod openai;

pub use error::BackendError;
pub use openai::OpenAiBackend;

use crate::tools::ToolDefinition;
use crate::types::{ChatMessage, Completion, ToolChoice};
use anyhow::Result;
use async_trait::async_trait;

/// A chat-completion capability.
///
/// Returns the first completion choice, or `None` when the backend answered
/// without any choice. Transport, auth and decoding failures are errors.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        tool_choice: ToolChoice,
    ) -> Result<Option<Completion>>;
}
