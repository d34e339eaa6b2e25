//! HTTP transport for the MCP server.
//!
//! An alternative to stdio for web-based clients: initialize and the tool
//! surface over plain HTTP endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{Error, Result};
use crate::mcp::handler::McpHandler;
use crate::mcp::protocol::*;

/// HTTP server state.
#[derive(Clone)]
pub struct HttpState {
    handler: Arc<McpHandler>,
    server_info: ServerInfo,
}

/// Build the MCP-over-HTTP router.
pub fn router(handler: Arc<McpHandler>, server_name: &str) -> Router {
    let state = HttpState {
        handler,
        server_info: ServerInfo {
            name: server_name.to_string(),
            version: crate::VERSION.to_string(),
        },
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/mcp/initialize", post(initialize))
        .route("/mcp/tools/list", get(list_tools))
        .route("/mcp/tools/call", post(call_tool))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn start_server(port: u16, handler: Arc<McpHandler>, server_name: &str) -> Result<()> {
    let app = router(handler, server_name);
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting HTTP transport on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::HttpServer(e.to_string()))?;

    Ok(())
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Initialize endpoint.
async fn initialize(State(state): State<HttpState>) -> impl IntoResponse {
    let result = InitializeResult {
        protocol_version: MCP_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability::default()),
            resources: None,
            prompts: None,
            logging: Some(LoggingCapability {}),
        },
        server_info: state.server_info,
    };

    Json(result)
}

/// List tools endpoint.
async fn list_tools(State(state): State<HttpState>) -> impl IntoResponse {
    let tools = state.handler.list_tools();
    Json(ListToolsResult { tools })
}

/// Call tool request body.
#[derive(Debug, Deserialize)]
struct CallToolRequest {
    name: String,
    #[serde(default)]
    arguments: std::collections::HashMap<String, serde_json::Value>,
}

/// Call tool endpoint.
async fn call_tool(
    State(state): State<HttpState>,
    Json(req): Json<CallToolRequest>,
) -> impl IntoResponse {
    let handler = match state.handler.get_tool(&req.name) {
        Some(h) => h,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": format!("Tool not found: {}", req.name)
                })),
            );
        }
    };

    match handler.execute(req.arguments).await {
        Ok(result) => match serde_json::to_value(result) {
            Ok(value) => (StatusCode::OK, Json(value)),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            ),
        },
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": e.to_string()
            })),
        ),
    }
}
