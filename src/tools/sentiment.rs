//! Sentiment classification via an external text-completion call.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::completion::CompletionClient;
use crate::error::Result;
use crate::mcp::handler::{error_result, get_string_arg, success_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};

/// Classifies text as positive, negative, or neutral.
pub struct SentimentTool {
    client: CompletionClient,
}

impl SentimentTool {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    /// Map free-form completion output onto one of the three labels.
    fn normalize(completion: &str) -> &'static str {
        let lowered = completion.trim().to_lowercase();
        if lowered.contains("positive") {
            "positive"
        } else if lowered.contains("negative") {
            "negative"
        } else {
            "neutral"
        }
    }
}

#[async_trait]
impl ToolHandler for SentimentTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "analyze_sentiment".to_string(),
            description: "Analyze the sentiment of a text using a text-completion model"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "description": "Text to analyze" }
                },
                "required": ["text"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let text = get_string_arg(&args, "text")?;
        let prompt = format!(
            "Analyze the sentiment of the following text as positive, negative, or neutral. \
             Just output a single word - 'positive', 'negative', or 'neutral'. \
             Text to analyze: {}",
            text
        );

        match self.client.complete(&prompt).await {
            Ok(completion) => {
                let sentiment = Self::normalize(&completion);
                let result = serde_json::json!({
                    "text": text,
                    "sentiment": sentiment,
                });
                Ok(success_result(result.to_string()))
            }
            Err(e) => Ok(error_result(format!("Sentiment analysis failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(SentimentTool::normalize("Positive"), "positive");
        assert_eq!(SentimentTool::normalize("  negative.\n"), "negative");
        assert_eq!(
            SentimentTool::normalize("The sentiment is positive"),
            "positive"
        );
        assert_eq!(SentimentTool::normalize("mixed feelings"), "neutral");
        assert_eq!(SentimentTool::normalize(""), "neutral");
    }

    #[tokio::test]
    async fn test_unreachable_api_surfaces_error_result() {
        // Port 9 is discard; the connection fails immediately.
        let client = CompletionClient::new("http://127.0.0.1:9", None, "test-model").unwrap();
        let tool = SentimentTool::new(client);

        let mut args = HashMap::new();
        args.insert("text".to_string(), serde_json::json!("hello"));

        let result = tool.execute(args).await.unwrap();
        assert!(result.is_error);
    }
}
