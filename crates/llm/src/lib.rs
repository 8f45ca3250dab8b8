//! LLM client abstraction layer
//!
//! Provides an OpenAI-compatible chat-completions client with tool binding,
//! behind the `CompletionBackend` trait so the server can be tested against a
//! scripted fake.

pub mod backend;
pub mod client;

pub use backend::{ChatOutcome, CompletionBackend};
pub use client::OpenAiClient;
