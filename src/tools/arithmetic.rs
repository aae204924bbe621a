//! Arithmetic demo tools.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::Result;
use crate::mcp::handler::{get_f64_or, text_result, ToolHandler};
use crate::mcp::progress::ProgressReporter;
use crate::mcp::protocol::{Tool, ToolResult};

/// Adds two numbers.
pub struct AddNumbersTool;

#[async_trait]
impl ToolHandler for AddNumbersTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "add_numbers".to_string(),
            description: "Adds two numbers".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "a": {
                        "type": "number",
                        "description": "First number",
                        "title": "Number A"
                    },
                    "b": {
                        "type": "number",
                        "description": "Second number",
                        "title": "Number B"
                    }
                },
                "required": ["a", "b"]
            }),
        }
    }

    async fn execute(
        &self,
        args: HashMap<String, Value>,
        _progress: Option<ProgressReporter>,
    ) -> Result<ToolResult> {
        let a = get_f64_or(&args, "a", 0.0);
        let b = get_f64_or(&args, "b", 0.0);
        Ok(text_result(format!("{} + {} = {}", a, b, a + b)))
    }
}

/// Multiplies two numbers.
pub struct MultiplyNumbersTool;

#[async_trait]
impl ToolHandler for MultiplyNumbersTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "multiply_numbers".to_string(),
            description: "Multiplies two numbers".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "x": {
                        "type": "number",
                        "description": "First number",
                        "title": "Number X"
                    },
                    "y": {
                        "type": "number",
                        "description": "Second number",
                        "title": "Number Y"
                    }
                },
                "required": ["x", "y"]
            }),
        }
    }

    async fn execute(
        &self,
        args: HashMap<String, Value>,
        _progress: Option<ProgressReporter>,
    ) -> Result<ToolResult> {
        let x = get_f64_or(&args, "x", 0.0);
        let y = get_f64_or(&args, "y", 0.0);
        Ok(text_result(format!("{} \u{00d7} {} = {}", x, y, x * y)))
    }
}
