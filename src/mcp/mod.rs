//! Model Context Protocol (MCP) implementation.
//!
//! JSON-RPC message handling, the stdio transport, and the registries for
//! tools, prompts, and resources.
//!
//! # Architecture
//!
//! - `protocol` - Core MCP types and message definitions
//! - `server` - MCP server implementation
//! - `transport` - Transport layer (stdio)
//! - `handler` - Tool handler trait and registry
//! - `prompts` - Prompt templates
//! - `resources` - Static and templated resources
//! - `progress` - Progress notifications for long-running tools

pub mod handler;
pub mod progress;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod transport;

pub use handler::McpHandler;
pub use protocol::*;
pub use server::McpServer;
pub use transport::{Message, StdioTransport, Transport};
