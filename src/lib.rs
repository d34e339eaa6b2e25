//! MCP Playground
//!
//! A small Model Context Protocol (MCP) demo suite: an MCP server exposing
//! example tools, resources, and prompts; a toy stdio client; an in-memory
//! pet store REST service; and a declarative API-spec adapter that maps REST
//! operations onto MCP tools.
//!
//! # Components
//!
//! - [`mcp`] - JSON-RPC protocol types, stdio transport, server dispatch
//! - [`tools`] - example tool handlers (arithmetic, greetings, progress,
//!   sentiment, pet store bindings)
//! - [`store`] / [`rest`] - the in-memory pet store and its HTTP surface
//! - [`apispec`] - declarative operation descriptions bound to MCP tools
//! - [`client`] - a minimal MCP client driving a server over stdio
//! - [`http`] - MCP over plain HTTP for web-based clients

pub mod apispec;
pub mod client;
pub mod completion;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod pattern;
pub mod rest;
pub mod store;
pub mod tools;

pub use error::{Error, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
