//! Core human-in-the-loop chat flow

use hitl_common::{AssistantError, Message, PendingAction, Result, SessionId};
use hitl_llm::{ChatOutcome, CompletionBackend};
use hitl_session::SessionStore;
use hitl_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::gate::ApprovalGate;

const UNKNOWN_TOOL_REPLY: &str = "I'm not sure how to handle that request.";
const CANCELLED_REPLY: &str = "Action cancelled by user.";

/// Outcome of one chat turn
#[derive(Debug, Clone)]
pub enum AssistantReply {
    /// Direct answer, already appended to history
    Answer(String),
    /// A gated tool call is now held for approval
    ApprovalRequired(PendingAction),
}

pub struct Assistant {
    backend: Arc<dyn CompletionBackend>,
    tools: ToolRegistry,
    store: Arc<SessionStore>,
    gate: ApprovalGate,
}

impl Assistant {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        tools: ToolRegistry,
        store: Arc<SessionStore>,
        gate: ApprovalGate,
    ) -> Self {
        Self {
            backend,
            tools,
            store,
            gate,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Handle one user message: consult the model, then execute or gate the
    /// tool call it asks for.
    #[instrument(skip(self, text), fields(session_id = %session_id, text_len = text.len()))]
    pub async fn handle_message(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<AssistantReply> {
        self.store
            .append_message(session_id, Message::new_user(text.to_string()));

        let history = self.store.history(session_id);
        let outcome = self
            .backend
            .complete(&history, &self.tools.definitions())
            .await
            .map_err(|e| AssistantError::Llm(e.to_string()))?;

        match outcome {
            ChatOutcome::Text(content) => {
                self.store
                    .append_message(session_id, Message::new_assistant(content.clone()));
                Ok(AssistantReply::Answer(content))
            }
            ChatOutcome::ToolCall(call) => {
                let Some(tool) = self.tools.get(&call.name) else {
                    warn!("Model requested unknown tool '{}'", call.name);
                    return Ok(AssistantReply::Answer(
                        self.answer(session_id, UNKNOWN_TOOL_REPLY.to_string()),
                    ));
                };

                if self.gate.requires_approval(tool.risk_level()) {
                    let action = PendingAction::new(call, text.to_string());
                    info!(
                        "Holding tool '{}' for approval (approval_id={})",
                        tool.name(),
                        action.approval_id
                    );
                    self.store.set_pending(session_id, action.clone());
                    return Ok(AssistantReply::ApprovalRequired(action));
                }

                info!("Executing tool '{}' automatically", tool.name());
                let text = match tool.invoke(&call.arguments).await {
                    Ok(result) => format!("The result is: {}", result),
                    // A failed calculation is still a chat reply, not a server error
                    Err(e) => {
                        warn!("Tool '{}' failed: {}", tool.name(), e);
                        format!("Error in calculation: {}", e)
                    }
                };
                Ok(AssistantReply::Answer(self.answer(session_id, text)))
            }
        }
    }

    /// Resolve the pending action for a session after a human decision.
    ///
    /// On approval the held tool runs exactly once; on denial nothing runs.
    /// The pending action is cleared either way, and the outcome is appended
    /// to the session history.
    #[instrument(skip(self), fields(session_id = %session_id, approved))]
    pub async fn resolve_pending(&self, session_id: &SessionId, approved: bool) -> Result<String> {
        let action = self.store.take_pending(session_id)?;

        if !approved {
            info!("Pending action {} denied", action.approval_id);
            return Ok(self.answer(session_id, CANCELLED_REPLY.to_string()));
        }

        let tool = self
            .tools
            .get(&action.tool_call.name)
            .ok_or_else(|| AssistantError::UnknownTool(action.tool_call.name.clone()))?;

        info!(
            "Pending action {} approved, executing '{}'",
            action.approval_id,
            tool.name()
        );

        let text = match tool.invoke(&action.tool_call.arguments).await {
            Ok(result) => tool.approved_reply(result),
            // Execution failure still produces a transcript entry, and the
            // pending action stays cleared.
            Err(e) => {
                warn!("Approved action failed: {}", e);
                format!("Error executing action: {}", e)
            }
        };

        self.store
            .append_message(session_id, Message::new_assistant(text.clone()));
        Ok(text)
    }

    fn answer(&self, session_id: &SessionId, text: String) -> String {
        self.store
            .append_message(session_id, Message::new_assistant(text.clone()));
        text
    }
}
