//! Approval endpoint for pending tool calls

use axum::{extract::State, http::StatusCode, response::Json};
use hitl_common::{AssistantError, SessionId};
use tracing::{error, info, instrument, warn};

use crate::server::AppState;
use crate::types::{ApproveRequest, ErrorResponse, MessageResponse};

/// Resolve the pending action of a session
///
/// On approval the held tool call executes exactly once and its result is
/// appended to the session history. On denial nothing executes and the
/// pending action is cleared.
#[utoipa::path(
    post,
    path = "/approve",
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "Decision processed", body = MessageResponse),
        (status = 404, description = "No pending action for this session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "chat"
)]
#[instrument(skip(state, req), fields(session_id = %req.session_id, approved = req.approved))]
pub async fn approve(
    State(state): State<AppState>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session_id = SessionId::from_string(req.session_id.clone());

    info!("Processing approval decision");

    match state
        .assistant
        .resolve_pending(&session_id, req.approved)
        .await
    {
        Ok(text) => {
            info!("Approval decision processed");
            Ok(Json(MessageResponse::answer(text, &session_id)))
        }
        Err(e @ (AssistantError::SessionNotFound(_) | AssistantError::NoPendingAction(_))) => {
            warn!(error = %e, "No pending action to resolve");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    format!("No pending action for session '{}'", session_id),
                    "PENDING_NOT_FOUND",
                )),
            ))
        }
        Err(e) => {
            error!(error = %e, "Approval processing failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "Something went wrong processing the decision.",
                    "APPROVAL_FAILED",
                )),
            ))
        }
    }
}
