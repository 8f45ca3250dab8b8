//! Chat endpoint, the core of the human-in-the-loop flow

use axum::{extract::State, http::StatusCode, response::Json};
use hitl_agent::AssistantReply;
use hitl_common::SessionId;
use tracing::{error, info, instrument, warn};

use crate::server::AppState;
use crate::types::{ChatRequest, ErrorResponse, MessageResponse};

/// Send a user message
///
/// Forwards the message to the language model with the declared tools and
/// branches on the outcome: direct answers and low-risk tool results come
/// back immediately, while higher-risk tool calls return an approval request
/// to be resolved via `/approve`. The first response to a gated request never
/// contains tool output.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer or approval request", body = MessageResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "chat"
)]
#[instrument(skip(state, req))]
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    if req.message.trim().is_empty() {
        warn!("Empty message provided");
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(
                "Message cannot be empty. Please provide a message string.",
                "EMPTY_MESSAGE",
            )),
        ));
    }

    // Create a session on the first message
    let session_id = req
        .session_id
        .filter(|s| !s.trim().is_empty())
        .map(SessionId::from_string)
        .unwrap_or_default();

    info!(
        session_id = %session_id,
        message_len = req.message.len(),
        message_preview = %req.message.chars().take(100).collect::<String>(),
        "Processing chat message"
    );

    match state.assistant.handle_message(&session_id, &req.message).await {
        Ok(AssistantReply::Answer(text)) => {
            info!(session_id = %session_id, "Returning direct answer");
            Ok(Json(MessageResponse::answer(text, &session_id)))
        }
        Ok(AssistantReply::ApprovalRequired(action)) => {
            info!(
                session_id = %session_id,
                approval_id = %action.approval_id,
                tool = %action.tool_call.name,
                "Returning approval request"
            );
            Ok(Json(MessageResponse::approval(&action, &session_id)))
        }
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Chat processing failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "Something went wrong processing the message.",
                    "PROCESSING_FAILED",
                )),
            ))
        }
    }
}
