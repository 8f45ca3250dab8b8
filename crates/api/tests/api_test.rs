//! Endpoint tests against the router with a scripted completion backend

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hitl_agent::{ApprovalGate, Assistant};
use hitl_api::{ApiServer, AppState};
use hitl_common::{
    GateMode, Message, RiskLevel, SessionId, SystemConfig, ToolCall, ToolDefinition,
};
use hitl_llm::{ChatOutcome, CompletionBackend};
use hitl_session::SessionStore;
use hitl_tools::{MultiplyTool, Tool, ToolRegistry};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

struct ScriptedBackend {
    script: Mutex<VecDeque<ChatOutcome>>,
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(
        &self,
        _history: &[Message],
        _tools: &[ToolDefinition],
    ) -> anyhow::Result<ChatOutcome> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted backend exhausted"))
    }
}

struct StubSearchTool;

#[async_trait]
impl Tool for StubSearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "search".to_string(),
            description: "Perform web search on the user query".to_string(),
            parameters: json!({"type": "object", "properties": {"query": {"type": "string"}}}),
        }
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::High
    }

    async fn invoke(&self, args: &Value) -> hitl_common::Result<String> {
        let query = args["query"].as_str().unwrap_or_default();
        Ok(format!("Search results:\n\n1. Stub result for '{}'", query))
    }

    fn approved_reply(&self, result: String) -> String {
        result
    }
}

fn test_router(outcomes: Vec<ChatOutcome>) -> Router {
    let store = Arc::new(SessionStore::new(Duration::from_secs(60)));

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(MultiplyTool::new()));
    tools.register(Arc::new(StubSearchTool));

    let assistant = Arc::new(Assistant::new(
        Arc::new(ScriptedBackend {
            script: Mutex::new(outcomes.into()),
        }),
        tools,
        store,
        ApprovalGate::new(GateMode::RiskBased),
    ));

    ApiServer::router(AppState {
        assistant,
        config: Arc::new(SystemConfig::default()),
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn search_call(query: &str) -> ChatOutcome {
    ChatOutcome::ToolCall(ToolCall {
        id: "call_search".to_string(),
        name: "search".to_string(),
        arguments: json!({ "query": query }),
    })
}

#[tokio::test]
async fn test_chat_direct_answer() {
    let app = test_router(vec![ChatOutcome::Text("Hello!".to_string())]);

    let response = app
        .oneshot(post_json("/chat", json!({"message": "hi"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["type"], "ai_response");
    assert_eq!(body["message"], "Hello!");
    assert!(body["session_id"].as_str().unwrap().len() > 0);
    assert!(body.get("approval_request").is_none());
}

#[tokio::test]
async fn test_chat_empty_message_rejected() {
    let app = test_router(vec![]);

    let response = app
        .oneshot(post_json("/chat", json!({"message": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(body["code"], "EMPTY_MESSAGE");
}

#[tokio::test]
async fn test_chat_multiply_runs_without_approval() {
    let app = test_router(vec![ChatOutcome::ToolCall(ToolCall {
        id: "call_m".to_string(),
        name: "multiply".to_string(),
        arguments: json!({"first_number": 25, "second_number": 48}),
    })]);

    let response = app
        .oneshot(post_json("/chat", json!({"message": "What is 25 times 48?"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["type"], "ai_response");
    assert_eq!(body["message"], "The result is: 1200");
}

#[tokio::test]
async fn test_search_approval_round_trip() {
    let app = test_router(vec![search_call("current president")]);

    // First response is only the approval prompt, never results
    let response = app
        .clone()
        .oneshot(post_json(
            "/chat",
            json!({"message": "Who is the current president?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["type"], "approval_request");
    assert!(body.get("message").is_none());

    let prompt = &body["approval_request"];
    assert_eq!(prompt["tool_name"], "search");
    assert_eq!(prompt["query"], "current president");
    assert_eq!(
        prompt["message"],
        "I want to search for: 'current president'. Do you approve?"
    );

    let session_id = body["session_id"].as_str().unwrap().to_string();

    // Approving executes the held search and returns its result
    let response = app
        .clone()
        .oneshot(post_json(
            "/approve",
            json!({"session_id": session_id, "approved": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["type"], "ai_response");
    let message = body["message"].as_str().unwrap();
    // Search replies are the rendered result block itself
    assert!(message.starts_with("Search results:"));
    assert!(message.contains("Stub result for 'current president'"));

    // The pending action is gone now
    let response = app
        .oneshot(post_json(
            "/approve",
            json!({"session_id": body["session_id"], "approved": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_denial_returns_cancellation() {
    let app = test_router(vec![search_call("anything")]);

    let response = app
        .clone()
        .oneshot(post_json("/chat", json!({"message": "search anything"})))
        .await
        .unwrap();
    let body = response_json(response).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(post_json(
            "/approve",
            json!({"session_id": session_id, "approved": false}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Action cancelled by user.");
}

#[tokio::test]
async fn test_approve_without_pending_is_404() {
    let app = test_router(vec![]);

    let response = app
        .oneshot(post_json(
            "/approve",
            json!({"session_id": SessionId::new().to_string(), "approved": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["code"], "PENDING_NOT_FOUND");
}

#[tokio::test]
async fn test_session_id_reused_across_turns() {
    let app = test_router(vec![
        ChatOutcome::Text("first".to_string()),
        ChatOutcome::Text("second".to_string()),
    ]);

    let response = app
        .clone()
        .oneshot(post_json("/chat", json!({"message": "one"})))
        .await
        .unwrap();
    let body = response_json(response).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({"message": "two", "session_id": session_id}),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["session_id"], session_id);
    assert_eq!(body["message"], "second");
}

#[tokio::test]
async fn test_upstream_failure_is_generic_500() {
    // Exhausted script makes the backend fail, like an upstream API error
    let app = test_router(vec![]);

    let response = app
        .oneshot(post_json("/chat", json!({"message": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["code"], "PROCESSING_FAILED");
    // Generic message, no upstream detail leaked
    assert!(!body["error"].as_str().unwrap().contains("exhausted"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router(vec![]);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_frontend_served() {
    let app = test_router(vec![]);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("Human-in-the-Loop AI Assistant"));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = test_router(vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-doc/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["openapi"].as_str().is_some());
    assert!(body["paths"].get("/chat").is_some());
    assert!(body["paths"].get("/approve").is_some());
}
