//! Reference tool handlers served by the mock server.
//!
//! - `arithmetic` - add and multiply two numbers
//! - `greeting` - localized greeting
//! - `search` - fake search emitting synthetic progress notifications

pub mod arithmetic;
pub mod greeting;
pub mod search;

use crate::mcp::handler::ToolRegistry;

/// Register all reference tools with the registry.
pub fn register_all_tools(registry: &mut ToolRegistry) {
    registry.register(arithmetic::AddNumbersTool);
    registry.register(arithmetic::MultiplyNumbersTool);
    registry.register(greeting::GetGreetingTool);
    registry.register(search::SearchWithProgressTool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tools_registered() {
        let mut registry = ToolRegistry::new();
        register_all_tools(&mut registry);

        assert_eq!(registry.tool_count(), 4);
        for name in [
            "add_numbers",
            "multiply_numbers",
            "get_greeting",
            "search_with_progress",
        ] {
            assert!(registry.has_tool(name), "missing tool: {}", name);
        }
    }
}
