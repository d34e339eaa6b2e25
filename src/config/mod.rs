//! Configuration management.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-playground")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tutorial MCP server, toy client, and pet-store demo API")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true, env = "MCP_PLAYGROUND_DEBUG")]
    pub debug: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the MCP server
    Serve(ServeOpts),
    /// Run the pet-store REST API
    Petstore(PetstoreOpts),
    /// Run the demo client against a server command
    Client(ClientOpts),
}

/// Options for the MCP server.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeOpts {
    /// Transport mode: stdio or http
    #[arg(short, long, default_value = "stdio", env = "MCP_PLAYGROUND_TRANSPORT")]
    pub transport: TransportKind,

    /// HTTP port (only for http transport)
    #[arg(short, long, default_value = "3000", env = "MCP_PLAYGROUND_PORT")]
    pub port: u16,

    /// Base URL of the pet-store API the adapter tools call
    #[arg(long, default_value = "http://localhost:5000", env = "PETSTORE_URL")]
    pub petstore_url: String,

    /// Completion API base URL (enables the sentiment tool)
    #[arg(long, env = "COMPLETION_API_URL")]
    pub completion_url: Option<String>,

    /// Completion API key
    #[arg(long, env = "COMPLETION_API_KEY")]
    pub completion_key: Option<String>,

    /// Completion model name
    #[arg(long, default_value = "text-davinci-003", env = "COMPLETION_MODEL")]
    pub completion_model: String,
}

/// Options for the pet-store REST API.
#[derive(clap::Args, Debug, Clone)]
pub struct PetstoreOpts {
    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "PETSTORE_PORT")]
    pub port: u16,

    /// Start with the sample pets loaded
    #[arg(long, env = "PETSTORE_SEED")]
    pub seed: bool,
}

/// Options for the demo client.
#[derive(clap::Args, Debug, Clone)]
pub struct ClientOpts {
    /// Server command to spawn (defaults to this binary's `serve` mode)
    #[arg(long)]
    pub server_cmd: Option<String>,
}

/// Transport mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Stdio,
    Http,
}
