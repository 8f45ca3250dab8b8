//! Completion backend seam

use async_trait::async_trait;
use hitl_common::{Message, ToolCall, ToolDefinition};

/// What the model produced for one completion round
#[derive(Debug, Clone)]
pub enum ChatOutcome {
    /// Plain assistant text, no tool needed
    Text(String),
    /// The model wants a tool executed
    ToolCall(ToolCall),
}

/// Capability interface for chat completion with declared tools.
///
/// Implemented by [`crate::OpenAiClient`] in production and by scripted fakes
/// in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        history: &[Message],
        tools: &[ToolDefinition],
    ) -> anyhow::Result<ChatOutcome>;
}
