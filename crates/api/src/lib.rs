//! # Human-in-the-Loop Assistant API Server
//!
//! REST API for a chat assistant whose higher-risk tool calls are suspended
//! until a human approves them.
//!
//! ## Endpoints
//!
//! - **GET** `/` - Embedded chat frontend
//! - **POST** `/chat` - Send a user message; returns either a direct answer
//!   or an approval request describing the proposed tool call
//! - **POST** `/approve` - Approve or deny the pending action of a session
//! - **GET** `/health` - Health check
//! - **GET** `/api-doc/openapi.json` - OpenAPI specification
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────┐
//! │  REST Endpoints   │ <- /chat, /approve, /health
//! ├──────────────────┤
//! │    Assistant      │ <- completion backend + approval gate
//! ├──────────────────┤
//! │  Session Store    │ <- per-session history + pending action
//! └──────────────────┘
//! ```
//!
//! Errors are returned as structured `ErrorResponse` JSON with machine-readable
//! codes; upstream failures surface as a generic 500.

pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;

pub use server::{ApiServer, AppState};
pub use types::*;
