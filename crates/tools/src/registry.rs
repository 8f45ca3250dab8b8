//! Tool registry mapping tool names to implementations

use hitl_common::ToolDefinition;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::{MultiplyTool, SearchTool, TavilyClient, Tool};

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry with the two built-in tools of this server
    pub fn builtin(search_client: TavilyClient) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MultiplyTool::new()));
        registry.register(Arc::new(SearchTool::new(search_client)));
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        debug!("Registering tool '{}'", tool.name());
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Definitions for model binding, in stable name order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> =
            self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
