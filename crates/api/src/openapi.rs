//! OpenAPI Specification Configuration
//!
//! The specification is generated from the route handlers and wire types
//! using utoipa and served at `/api-doc/openapi.json`.

use axum::response::Json;
use utoipa::OpenApi;

use crate::routes;
use crate::types::*;

/// OpenAPI specification for the HITL assistant API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Human-in-the-Loop Assistant API",
        description = "
Chat assistant with a human approval gate for higher-risk tool calls.

## Usage Pattern

1. **POST** `/chat` with a message (and optionally a `session_id`)
2. If the response `type` is `ai_response`, the `message` field is the answer
3. If the response `type` is `approval_request`, present the prompt to the
   human and **POST** `/approve` with their decision
4. The `/approve` response carries the tool result (or a cancellation notice)
",
        version = "0.1.0"
    ),
    paths(
        routes::chat::chat,
        routes::approve::approve,
        routes::health::health,
    ),
    components(schemas(
        ChatRequest,
        ApproveRequest,
        MessageResponse,
        ResponseKind,
        ApprovalPrompt,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "chat", description = "Chat and approval endpoints"),
        (name = "system", description = "Health and diagnostics"),
    )
)]
pub struct ApiDoc;

/// Serve the raw OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
