use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a conversation session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a pending approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalId(pub Uuid);

impl ApprovalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ApprovalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ApprovalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message in conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new_user(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn new_assistant(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn new_system(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::System,
            content,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Wire name used by chat-completions APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Structured request from the language model naming a tool and its arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Declared callable tool, in provider-neutral form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema for the tool arguments
    pub parameters: serde_json::Value,
}

/// Risk classification for a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Gate policy mode, controls which risk levels require a human
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// Execute every tool call automatically
    Auto,
    /// Gate High and Critical risk tools
    RiskBased,
    /// Gate every tool call
    Blocking,
}

impl Default for GateMode {
    fn default() -> Self {
        GateMode::RiskBased
    }
}

/// Tool call held for human approval. At most one exists per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAction {
    pub approval_id: ApprovalId,
    pub tool_call: ToolCall,
    /// The user message that triggered the tool request
    pub original_query: String,
    pub requested_at: DateTime<Utc>,
}

impl PendingAction {
    pub fn new(tool_call: ToolCall, original_query: String) -> Self {
        Self {
            approval_id: ApprovalId::new(),
            tool_call,
            original_query,
            requested_at: Utc::now(),
        }
    }

    /// Human-readable query extracted from the tool arguments, for display
    pub fn display_query(&self) -> String {
        self.tool_call
            .arguments
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}
