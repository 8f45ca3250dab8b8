//! Callable tools exposed to the language model
//!
//! Each tool declares a JSON-schema definition for model binding and a static
//! risk level the approval gate uses to decide whether a human must sign off.

pub mod multiply;
pub mod registry;
pub mod search;
pub mod tavily;

pub use multiply::MultiplyTool;
pub use registry::ToolRegistry;
pub use search::SearchTool;
pub use tavily::{SearchResult, TavilyClient};

use async_trait::async_trait;
use hitl_common::{Result, RiskLevel, ToolDefinition};

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// Definition handed to the model for binding
    fn definition(&self) -> ToolDefinition;

    fn risk_level(&self) -> RiskLevel;

    /// Execute the tool with the model-provided argument object
    async fn invoke(&self, args: &serde_json::Value) -> Result<String>;

    /// Render the transcript line for a result a human approved. Tools whose
    /// output already reads as a chat reply override this to pass it through.
    fn approved_reply(&self, result: String) -> String {
        format!("Tool executed successfully: {}", result)
    }
}
