//! OpenAI-compatible chat-completions client
//!
//! Speaks the standard chat-completions wire format with function-calling
//! tools. The first tool call in a response wins; the rest are ignored.

use anyhow::{Context, Result};
use async_trait::async_trait;
use hitl_common::{LlmConfig, Message, ToolCall, ToolDefinition};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::backend::{ChatOutcome, CompletionBackend};

/// Chat-completions HTTP client with connection pooling
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    /// Base URL of the API (e.g. "https://api.openai.com/v1")
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

#[derive(Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Deserialize)]
struct WireChoiceMessage {
    #[serde(default)]
    content: Option<String>,

    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Deserialize)]
struct WireToolCall {
    id: String,
    function: WireCalledFunction,
}

#[derive(Deserialize)]
struct WireCalledFunction {
    name: String,
    /// JSON-encoded argument object, per the chat-completions format
    arguments: String,
}

impl OpenAiClient {
    /// Create a new client from config plus the resolved API key
    #[instrument(skip_all, fields(api_base = %config.api_base, model = %config.model))]
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to build HTTP client")?;

        let instance = Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        };

        info!(
            "Initialized chat client: api_base={}, model={}",
            instance.api_base, instance.model
        );

        Ok(instance)
    }

    #[instrument(skip(self, history, tools), fields(model = %self.model, history_len = history.len()))]
    async fn send(&self, history: &[Message], tools: &[ToolDefinition]) -> Result<ChatOutcome> {
        let url = format!("{}/chat/completions", self.api_base);

        let request = WireRequest {
            model: &self.model,
            messages: history
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: tools
                .iter()
                .map(|t| WireTool {
                    kind: "function",
                    function: WireFunction {
                        name: &t.name,
                        description: &t.description,
                        parameters: &t.parameters,
                    },
                })
                .collect(),
        };

        debug!("Sending chat completion request with {} tools", tools.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Chat API returned error status {}: {}", status, error_text);
        }

        let wire: WireResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .context("Chat API response contained no choices")?;

        if let Some(call) = choice.message.tool_calls.into_iter().next() {
            let arguments: serde_json::Value = serde_json::from_str(&call.function.arguments)
                .with_context(|| {
                    format!("Invalid tool arguments for '{}'", call.function.name)
                })?;

            info!("Model requested tool '{}'", call.function.name);
            return Ok(ChatOutcome::ToolCall(ToolCall {
                id: call.id,
                name: call.function.name,
                arguments,
            }));
        }

        match choice.message.content {
            Some(content) => Ok(ChatOutcome::Text(content)),
            None => {
                warn!("Chat API returned neither content nor tool calls");
                anyhow::bail!("Chat API returned an empty message")
            }
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        history: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ChatOutcome> {
        self.send(history, tools).await
    }
}
