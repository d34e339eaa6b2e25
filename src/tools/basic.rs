//! Basic demo tools: pure functions with no shared state.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::Result;
use crate::mcp::handler::{get_int_arg, get_string_arg, success_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};

/// Adds two integers.
pub struct AddTool;

#[async_trait]
impl ToolHandler for AddTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "add".to_string(),
            description: "Add two numbers".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "a": { "type": "integer", "description": "First addend" },
                    "b": { "type": "integer", "description": "Second addend" }
                },
                "required": ["a", "b"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let a = get_int_arg(&args, "a")?;
        let b = get_int_arg(&args, "b")?;
        Ok(success_result((a + b).to_string()))
    }
}

/// Returns a personalized greeting.
pub struct GreetTool;

#[async_trait]
impl ToolHandler for GreetTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "greet".to_string(),
            description: "Get a personalized greeting".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Name to greet" }
                },
                "required": ["name"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let name = get_string_arg(&args, "name")?;
        Ok(success_result(format!("Hello, {}!", name)))
    }
}

/// Looks up a (static) stock price for a ticker.
pub struct StockPriceTool;

impl StockPriceTool {
    fn price_for(ticker: &str) -> f64 {
        match ticker.to_uppercase().as_str() {
            "AAPL" => 180.50,
            "GOOG" => 140.20,
            _ => 0.0,
        }
    }
}

#[async_trait]
impl ToolHandler for StockPriceTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "stock_price".to_string(),
            description: "Gets the current price for a stock ticker".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "ticker": { "type": "string", "description": "Stock ticker symbol" }
                },
                "required": ["ticker"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let ticker = get_string_arg(&args, "ticker")?;
        Ok(success_result(Self::price_for(&ticker).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::ContentBlock;
    use serde_json::json;

    fn text_of(result: &ToolResult) -> &str {
        match &result.content[0] {
            ContentBlock::Text { text } => text,
            other => panic!("Expected text content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add() {
        let mut args = HashMap::new();
        args.insert("a".to_string(), json!(2));
        args.insert("b".to_string(), json!(3));

        let result = AddTool.execute(args).await.unwrap();
        assert!(!result.is_error);
        assert_eq!(text_of(&result), "5");
    }

    #[tokio::test]
    async fn test_add_missing_argument() {
        let mut args = HashMap::new();
        args.insert("a".to_string(), json!(2));
        assert!(AddTool.execute(args).await.is_err());
    }

    #[tokio::test]
    async fn test_greet() {
        let mut args = HashMap::new();
        args.insert("name".to_string(), json!("World"));

        let result = GreetTool.execute(args).await.unwrap();
        assert_eq!(text_of(&result), "Hello, World!");
    }

    #[tokio::test]
    async fn test_stock_price() {
        let mut args = HashMap::new();
        args.insert("ticker".to_string(), json!("aapl"));

        let result = StockPriceTool.execute(args).await.unwrap();
        assert_eq!(text_of(&result), "180.5");

        let mut args = HashMap::new();
        args.insert("ticker".to_string(), json!("NOPE"));
        let result = StockPriceTool.execute(args).await.unwrap();
        assert_eq!(text_of(&result), "0");
    }
}
