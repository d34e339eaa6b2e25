//! MCP tool implementations.
//!
//! Organized by category:
//!
//! - `basic` - pure-function demo tools (add, greet, stock_price)
//! - `progress_demo` - a long-running tool that reports progress
//! - `sentiment` - sentiment classification via an external completion call
//! - `petstore` - bindings generated from the pet-store interface schema

pub mod basic;
pub mod petstore;
pub mod progress_demo;
pub mod sentiment;

use std::sync::Arc;

use crate::apispec::petstore_spec;
use crate::completion::CompletionClient;
use crate::error::Result;
use crate::mcp::handler::McpHandler;
use crate::mcp::progress::ProgressManager;

/// Register every tool with the handler.
///
/// The sentiment tool is only registered when a completion client is
/// configured; the pet-store bindings always register and surface connection
/// failures at call time.
pub fn register_all_tools(
    handler: &mut McpHandler,
    progress: Arc<ProgressManager>,
    completion: Option<CompletionClient>,
    petstore_url: &str,
) -> Result<()> {
    handler.register(basic::AddTool);
    handler.register(basic::GreetTool);
    handler.register(basic::StockPriceTool);
    handler.register(progress_demo::SlowCountTool::new(progress));

    if let Some(client) = completion {
        handler.register(sentiment::SentimentTool::new(client));
    }

    for tool in petstore::bind_tools(&petstore_spec(), petstore_url)? {
        handler.register_arc(tool);
    }

    Ok(())
}
