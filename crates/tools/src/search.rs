//! Web search tool, gated behind human approval

use async_trait::async_trait;
use hitl_common::{AssistantError, Result, RiskLevel, ToolDefinition};
use serde_json::{json, Value};
use tracing::info;

use crate::tavily::{SearchResult, TavilyClient};
use crate::Tool;

/// How many results make it into the formatted reply
const DISPLAY_RESULTS: usize = 3;

/// Snippet truncation length for display
const SNIPPET_LEN: usize = 200;

pub struct SearchTool {
    client: TavilyClient,
}

impl SearchTool {
    pub fn new(client: TavilyClient) -> Self {
        Self { client }
    }
}

/// Format the top results for the chat transcript
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "Search returned no results.".to_string();
    }

    let mut formatted = String::from("Search results:\n\n");
    for (i, item) in results.iter().take(DISPLAY_RESULTS).enumerate() {
        let snippet: String = item.content.chars().take(SNIPPET_LEN).collect();
        let ellipsis = if item.content.chars().count() > SNIPPET_LEN {
            "..."
        } else {
            ""
        };
        formatted.push_str(&format!(
            "{}. {}\n{}{}\n{}\n\n",
            i + 1,
            item.title,
            snippet,
            ellipsis,
            item.url
        ));
    }
    formatted
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "search".to_string(),
            description: "Perform web search on the user query".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string"}
                },
                "required": ["query"]
            }),
        }
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::High
    }

    async fn invoke(&self, args: &Value) -> Result<String> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AssistantError::Tool("Missing string argument 'query'".to_string()))?;

        let results = self
            .client
            .search(query)
            .await
            .map_err(|e| AssistantError::Search(e.to_string()))?;

        info!("Search executed: query='{}', {} results", query, results.len());
        Ok(format_results(&results))
    }

    // Results are already rendered as a transcript block
    fn approved_reply(&self, result: String) -> String {
        result
    }
}
