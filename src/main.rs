//! MCP Playground entry point.
//!
//! Three commands: `serve` runs the MCP server (stdio or HTTP), `petstore`
//! runs the pet-store REST API, and `client` drives a server end-to-end as a
//! demo MCP client.

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use mcp_playground::completion::CompletionClient;
use mcp_playground::config::{Args, ClientOpts, Command, PetstoreOpts, ServeOpts, TransportKind};
use mcp_playground::error::{Error, Result};
use mcp_playground::mcp::handler::McpHandler;
use mcp_playground::mcp::progress::ProgressManager;
use mcp_playground::mcp::prompts::PromptRegistry;
use mcp_playground::mcp::resources::ResourceRegistry;
use mcp_playground::mcp::server::McpServer;
use mcp_playground::mcp::transport::StdioTransport;
use mcp_playground::{client, http, rest, store, tools, VERSION};

const SERVER_NAME: &str = "mcp-playground";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logging goes to stderr so stdout stays clean for the stdio transport.
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set tracing subscriber: {}", e)))?;

    info!("MCP Playground v{}", VERSION);

    match args.command {
        Command::Serve(opts) => serve(opts).await,
        Command::Petstore(opts) => petstore(opts).await,
        Command::Client(opts) => run_client(opts).await,
    }
}

/// Run the MCP server.
async fn serve(opts: ServeOpts) -> Result<()> {
    let progress = Arc::new(ProgressManager::new());

    let completion = opts
        .completion_url
        .as_ref()
        .map(|url| CompletionClient::new(url, opts.completion_key.clone(), &opts.completion_model))
        .transpose()?;
    if completion.is_some() {
        info!("Sentiment tool enabled via completion API");
    }

    let mut handler = McpHandler::new();
    tools::register_all_tools(
        &mut handler,
        progress.clone(),
        completion,
        &opts.petstore_url,
    )?;
    info!("Registered {} MCP tools", handler.tool_count());

    match opts.transport {
        TransportKind::Stdio => {
            info!("Starting stdio transport...");
            let server = McpServer::with_features(
                handler,
                PromptRegistry::new(),
                ResourceRegistry::with_demo_resources(),
                progress,
                SERVER_NAME,
            );
            server.run(StdioTransport::new()).await?;
        }
        TransportKind::Http => {
            http::start_server(opts.port, Arc::new(handler), SERVER_NAME).await?;
        }
    }

    Ok(())
}

/// Run the pet-store REST API.
async fn petstore(opts: PetstoreOpts) -> Result<()> {
    let store = if opts.seed {
        store::PetStore::with_sample_pets()
    } else {
        store::PetStore::new()
    };
    info!("Pet store ready with {} pets", store.len());

    rest::start_server(opts.port, store.into_shared()).await
}

/// Drive an MCP server over stdio as a toy client.
async fn run_client(opts: ClientOpts) -> Result<()> {
    let mut mcp = match opts.server_cmd {
        Some(cmd) => {
            let mut parts = cmd.split_whitespace();
            let program = parts
                .next()
                .ok_or_else(|| Error::Config("Empty server command".to_string()))?;
            let rest: Vec<&str> = parts.collect();
            client::McpClient::spawn(program, &rest).await?
        }
        None => {
            let exe = std::env::current_exe()?;
            let exe = exe.to_string_lossy().into_owned();
            client::McpClient::spawn(&exe, &["serve"]).await?
        }
    };

    let init = mcp.initialize().await?;
    info!("Connected: {}", init);

    let tools = mcp.list_tools().await?;
    info!("Server exposes {} tools:", tools.len());
    for tool in &tools {
        info!("  {} - {}", tool.name, tool.description);
    }

    let greeting = mcp
        .call_tool("greet", serde_json::json!({ "name": "Ford" }))
        .await?;
    info!("greet -> {:?}", greeting.content);

    let sum = mcp
        .call_tool("add", serde_json::json!({ "a": 2, "b": 3 }))
        .await?;
    info!("add(2, 3) -> {:?}", sum.content);

    match mcp.read_resource("greeting://Ford").await {
        Ok(contents) => info!("greeting://Ford -> {:?}", contents.contents),
        Err(e) => error!("Resource read failed: {}", e),
    }

    let prompt = mcp
        .get_prompt(
            "ask_review",
            serde_json::json!({ "code_snippet": "fn main() {}" }),
        )
        .await?;
    info!("ask_review produced {} messages", prompt.messages.len());

    mcp.shutdown().await
}
