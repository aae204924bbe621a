//! Greeting demo tool.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::Result;
use crate::mcp::handler::{get_str_or, text_result, ToolHandler};
use crate::mcp::progress::ProgressReporter;
use crate::mcp::protocol::{Tool, ToolResult};

/// Generates a greeting in Korean or English.
pub struct GetGreetingTool;

#[async_trait]
impl ToolHandler for GetGreetingTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "get_greeting".to_string(),
            description: "Generates a greeting".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name to greet",
                        "title": "Name"
                    },
                    "language": {
                        "type": "string",
                        "description": "Language (ko, en)",
                        "title": "Language",
                        "default": "ko"
                    }
                },
                "required": ["name"]
            }),
        }
    }

    async fn execute(
        &self,
        args: HashMap<String, Value>,
        _progress: Option<ProgressReporter>,
    ) -> Result<ToolResult> {
        let name = get_str_or(&args, "name", "Guest");
        let language = get_str_or(&args, "language", "ko");

        let message = if language == "ko" {
            format!("안녕하세요, {}님!", name)
        } else {
            format!("Hello, {}!", name)
        };

        Ok(text_result(message))
    }
}
