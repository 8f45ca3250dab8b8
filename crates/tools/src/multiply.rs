//! Integer multiplication tool, executed automatically

use async_trait::async_trait;
use hitl_common::{AssistantError, Result, RiskLevel, ToolDefinition};
use serde_json::{json, Value};
use tracing::debug;

use crate::Tool;

pub struct MultiplyTool;

impl MultiplyTool {
    pub fn new() -> Self {
        Self
    }

    fn extract_int(args: &Value, field: &str) -> Result<i64> {
        args.get(field)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| AssistantError::Tool(format!("Missing integer argument '{}'", field)))
    }
}

impl Default for MultiplyTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MultiplyTool {
    fn name(&self) -> &str {
        "multiply"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "multiply".to_string(),
            description: "Multiply two integer numbers".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "first_number": {"type": "integer"},
                    "second_number": {"type": "integer"}
                },
                "required": ["first_number", "second_number"]
            }),
        }
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Low
    }

    async fn invoke(&self, args: &Value) -> Result<String> {
        let first = Self::extract_int(args, "first_number")?;
        let second = Self::extract_int(args, "second_number")?;

        let product = first.checked_mul(second).ok_or_else(|| {
            AssistantError::Tool(format!("Multiplication overflow: {} * {}", first, second))
        })?;

        debug!("multiply: {} * {} = {}", first, second, product);
        Ok(product.to_string())
    }
}
