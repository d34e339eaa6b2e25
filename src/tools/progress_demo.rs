//! A long-running demo tool that reports progress while it works.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::mcp::handler::{get_optional_int_arg, success_result, ToolHandler};
use crate::mcp::progress::ProgressManager;
use crate::mcp::protocol::{Tool, ToolResult};

/// Default number of steps when the caller does not specify one.
const DEFAULT_STEPS: i64 = 5;

/// Delay between steps, kept short so the demo stays snappy.
const STEP_DELAY: Duration = Duration::from_millis(100);

/// Counts up to `steps`, emitting a progress notification per step.
pub struct SlowCountTool {
    progress: Arc<ProgressManager>,
}

impl SlowCountTool {
    pub fn new(progress: Arc<ProgressManager>) -> Self {
        Self { progress }
    }
}

#[async_trait]
impl ToolHandler for SlowCountTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "slow_count".to_string(),
            description: "Counts to a number slowly, reporting progress along the way"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "steps": {
                        "type": "integer",
                        "description": "Number of steps to count (default 5, max 100)"
                    }
                }
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let steps = get_optional_int_arg(&args, "steps")
            .unwrap_or(DEFAULT_STEPS)
            .clamp(1, 100) as u64;

        let reporter = self.progress.create_reporter(Some(steps));
        for step in 1..=steps {
            tokio::time::sleep(STEP_DELAY).await;
            reporter.report(step, Some(&format!("step {}/{}", step, steps))).await;
        }
        reporter.complete(Some("done")).await;

        Ok(success_result(format!("Counted to {}", steps)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::ContentBlock;
    use serde_json::json;

    #[tokio::test]
    async fn test_slow_count_reports_each_step() {
        let manager = Arc::new(ProgressManager::new());
        let tool = SlowCountTool::new(manager.clone());

        let mut args = HashMap::new();
        args.insert("steps".to_string(), json!(3));

        let result = tool.execute(args).await.unwrap();
        assert!(!result.is_error);
        match &result.content[0] {
            ContentBlock::Text { text } => assert_eq!(text, "Counted to 3"),
            other => panic!("Expected text content, got {:?}", other),
        }

        // 3 step reports plus the completion report.
        let receiver = manager.receiver();
        let mut rx = receiver.lock().await;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(rx.recv().await.unwrap().params.progress);
        }
        assert_eq!(seen, vec![1, 2, 3, 3]);
    }

    #[tokio::test]
    async fn test_steps_clamped() {
        let manager = Arc::new(ProgressManager::new());
        let tool = SlowCountTool::new(manager);

        let mut args = HashMap::new();
        args.insert("steps".to_string(), json!(-5));

        let result = tool.execute(args).await.unwrap();
        match &result.content[0] {
            ContentBlock::Text { text } => assert_eq!(text, "Counted to 1"),
            other => panic!("Expected text content, got {:?}", other),
        }
    }
}
