//! Tool registry and handler trait.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::mcp::progress::ProgressReporter;
use crate::mcp::protocol::{ContentBlock, Tool, ToolResult};

/// Handler for MCP tool calls.
///
/// `progress` is absent when the caller has no use for progress events;
/// a handler must complete normally either way.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the tool definition.
    fn definition(&self) -> Tool;

    /// Execute the tool with the given arguments.
    async fn execute(
        &self,
        arguments: HashMap<String, Value>,
        progress: Option<ProgressReporter>,
    ) -> Result<ToolResult>;
}

/// Registry of tool handlers, keyed by tool name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool handler.
    pub fn register<T: ToolHandler + 'static>(&mut self, handler: T) {
        let tool = handler.definition();
        self.tools.insert(tool.name.clone(), Arc::new(handler));
    }

    /// Get all registered tool definitions.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.values().map(|h| h.definition()).collect()
    }

    /// Get a tool by name.
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to create a text content block.
pub fn text_content(text: impl Into<String>) -> ContentBlock {
    ContentBlock::Text { text: text.into() }
}

/// Helper to create a single-text tool result.
pub fn text_result(text: impl Into<String>) -> ToolResult {
    ToolResult {
        content: vec![text_content(text)],
    }
}

/// Extract a number argument, falling back to a default when absent or
/// not numeric.
pub fn get_f64_or(args: &HashMap<String, Value>, name: &str, default: f64) -> f64 {
    args.get(name).and_then(|v| v.as_f64()).unwrap_or(default)
}

/// Extract a string argument with a default.
pub fn get_str_or(args: &HashMap<String, Value>, name: &str, default: &str) -> String {
    args.get(name)
        .and_then(|v| v.as_str())
        .unwrap_or(default)
        .to_string()
}

/// Extract an unsigned integer argument with a default.
pub fn get_u64_or(args: &HashMap<String, Value>, name: &str, default: u64) -> u64 {
    args.get(name).and_then(|v| v.as_u64()).unwrap_or(default)
}
