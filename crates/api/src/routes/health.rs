use axum::{extract::State, response::Json};
use chrono::Utc;

use crate::server::AppState;
use crate::types::HealthResponse;

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: Some(format!(
            "{} active sessions",
            state.assistant.store().len()
        )),
        timestamp: Utc::now(),
    })
}
