//! Wire types for the HITL assistant API

use chrono::{DateTime, Utc};
use hitl_common::{PendingAction, SessionId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to send a chat message
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The user's message
    pub message: String,

    /// Session to continue; omitted on the first message
    pub session_id: Option<String>,
}

/// Human decision on the pending action of a session
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveRequest {
    pub session_id: String,
    pub approved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    AiResponse,
    ApprovalRequest,
}

/// Approval prompt shown to the human
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApprovalPrompt {
    pub approval_id: String,
    pub tool_name: String,
    /// The query the assistant wants to run
    pub query: String,
    /// Human-readable prompt text
    pub message: String,
}

/// Response to both /chat and /approve
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[serde(rename = "type")]
    pub kind: ResponseKind,

    /// Assistant text, present for direct answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Present when a human decision is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_request: Option<ApprovalPrompt>,

    pub session_id: String,
}

impl MessageResponse {
    pub fn answer(text: String, session_id: &SessionId) -> Self {
        Self {
            kind: ResponseKind::AiResponse,
            message: Some(text),
            approval_request: None,
            session_id: session_id.to_string(),
        }
    }

    pub fn approval(action: &PendingAction, session_id: &SessionId) -> Self {
        let query = action.display_query();
        Self {
            kind: ResponseKind::ApprovalRequest,
            message: None,
            approval_request: Some(ApprovalPrompt {
                approval_id: action.approval_id.to_string(),
                tool_name: action.tool_call.name.clone(),
                query: query.clone(),
                message: format!("I want to search for: '{}'. Do you approve?", query),
            }),
            session_id: session_id.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,

    pub code: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: Some(code.to_string()),
            timestamp: Utc::now(),
        }
    }
}
