//! MCP tool handlers and registry.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::mcp::protocol::{Tool, ToolResult};

/// Handler for MCP tool calls.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the tool definition.
    fn definition(&self) -> Tool;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: HashMap<String, Value>) -> Result<ToolResult>;
}

/// Registry of tool handlers.
pub struct McpHandler {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
}

impl McpHandler {
    /// Create a new handler registry.
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

    /// Register a tool handler (Arc version).
    pub fn register_arc(&mut self, handler: Arc<dyn ToolHandler>) {
        let tool = handler.definition();
        self.tools.insert(tool.name.clone(), handler);
    }

    /// Get all registered tools.
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

    /// Get the number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for McpHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to create a text content block.
pub fn text_content(text: impl Into<String>) -> crate::mcp::protocol::ContentBlock {
    crate::mcp::protocol::ContentBlock::Text { text: text.into() }
}

/// Helper to create a successful tool result.
pub fn success_result(text: impl Into<String>) -> ToolResult {
    ToolResult {
        content: vec![text_content(text)],
        is_error: false,
    }
}

/// Helper to create an error tool result.
pub fn error_result(text: impl Into<String>) -> ToolResult {
    ToolResult {
        content: vec![text_content(text)],
        is_error: true,
    }
}

/// Helper to extract a required string argument.
pub fn get_string_arg(args: &HashMap<String, Value>, name: &str) -> Result<String> {
    match args.get(name) {
        None => Err(crate::error::Error::InvalidToolArguments(format!(
            "Missing required argument: {}",
            name
        ))),
        Some(value) => value.as_str().map(String::from).ok_or_else(|| {
            crate::error::Error::InvalidToolArguments(format!(
                "Argument {} must be a string",
                name
            ))
        }),
    }
}

/// Helper to extract an optional string argument.
pub fn get_optional_string_arg(args: &HashMap<String, Value>, name: &str) -> Option<String> {
    args.get(name).and_then(|v| v.as_str()).map(String::from)
}

/// Helper to extract a required integer argument.
pub fn get_int_arg(args: &HashMap<String, Value>, name: &str) -> Result<i64> {
    match args.get(name) {
        None => Err(crate::error::Error::InvalidToolArguments(format!(
            "Missing required argument: {}",
            name
        ))),
        Some(value) => value.as_i64().ok_or_else(|| {
            crate::error::Error::InvalidToolArguments(format!(
                "Argument {} must be an integer",
                name
            ))
        }),
    }
}

/// Helper to extract an optional integer argument.
pub fn get_optional_int_arg(args: &HashMap<String, Value>, name: &str) -> Option<i64> {
    args.get(name).and_then(|v| v.as_i64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool {
        name: String,
    }

    #[async_trait]
    impl ToolHandler for EchoTool {
        fn definition(&self) -> Tool {
            Tool {
                name: self.name.clone(),
                description: format!("Echo tool: {}", self.name),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "input": { "type": "string" }
                    }
                }),
            }
        }

        async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
            let input = get_optional_string_arg(&args, "input").unwrap_or_default();
            Ok(success_result(format!("{}: {}", self.name, input)))
        }
    }

    #[test]
    fn test_handler_registration() {
        let mut handler = McpHandler::new();
        handler.register(EchoTool {
            name: "echo".to_string(),
        });

        assert_eq!(handler.tool_count(), 1);
        assert!(handler.has_tool("echo"));
        assert!(!handler.has_tool("nonexistent"));
    }

    #[test]
    fn test_handler_list_tools() {
        let mut handler = McpHandler::new();
        handler.register(EchoTool {
            name: "tool_a".to_string(),
        });
        handler.register(EchoTool {
            name: "tool_b".to_string(),
        });

        let tools = handler.list_tools();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| &t.name).collect();
        assert!(names.contains(&&"tool_a".to_string()));
        assert!(names.contains(&&"tool_b".to_string()));
    }

    #[tokio::test]
    async fn test_tool_execution() {
        let mut handler = McpHandler::new();
        handler.register(EchoTool {
            name: "echo".to_string(),
        });

        let tool = handler.get_tool("echo").unwrap();
        let mut args = HashMap::new();
        args.insert("input".to_string(), json!("hello"));

        let result = tool.execute(args).await.unwrap();
        assert!(!result.is_error);

        if let crate::mcp::protocol::ContentBlock::Text { text } = &result.content[0] {
            assert_eq!(text, "echo: hello");
        } else {
            panic!("Expected text content");
        }
    }

    #[test]
    fn test_get_string_arg() {
        let mut args = HashMap::new();
        args.insert("name".to_string(), json!("value"));

        assert_eq!(get_string_arg(&args, "name").unwrap(), "value");
        assert!(get_string_arg(&args, "missing").is_err());
    }

    #[test]
    fn test_get_int_args() {
        let mut args = HashMap::new();
        args.insert("count".to_string(), json!(42));

        assert_eq!(get_int_arg(&args, "count").unwrap(), 42);
        assert!(get_int_arg(&args, "missing").is_err());
        assert_eq!(get_optional_int_arg(&args, "count"), Some(42));
        assert_eq!(get_optional_int_arg(&args, "missing"), None);
    }

    #[test]
    fn test_arg_errors_distinguish_missing_from_wrong_type() {
        let mut args = HashMap::new();
        args.insert("a".to_string(), json!("2"));
        args.insert("name".to_string(), json!(7));

        let err = get_int_arg(&args, "a").unwrap_err();
        assert_eq!(err.to_string(), "Invalid tool arguments: Argument a must be an integer");

        let err = get_int_arg(&args, "b").unwrap_err();
        assert_eq!(err.to_string(), "Invalid tool arguments: Missing required argument: b");

        let err = get_string_arg(&args, "name").unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_result_helpers() {
        let ok = success_result("done");
        assert!(!ok.is_error);
        assert_eq!(ok.content.len(), 1);

        let err = error_result("failed");
        assert!(err.is_error);
    }
}
