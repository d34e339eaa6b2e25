//! MCP server implementation.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::mcp::handler::McpHandler;
use crate::mcp::progress::ProgressManager;
use crate::mcp::prompts::{ListPromptsResult, PromptRegistry};
use crate::mcp::protocol::*;
use crate::mcp::resources::ResourceRegistry;
use crate::mcp::transport::{Message, Transport};
use crate::VERSION;

/// MCP server.
pub struct McpServer {
    handler: Arc<McpHandler>,
    prompts: Arc<PromptRegistry>,
    resources: Arc<ResourceRegistry>,
    progress: Arc<ProgressManager>,
    name: String,
    version: String,
}

impl McpServer {
    /// Create a server with empty prompt and resource registries.
    pub fn new(handler: McpHandler, name: impl Into<String>) -> Self {
        Self::with_features(
            handler,
            PromptRegistry::default(),
            ResourceRegistry::new(),
            Arc::new(ProgressManager::new()),
            name,
        )
    }

    /// Create a server with the given registries.
    pub fn with_features(
        handler: McpHandler,
        prompts: PromptRegistry,
        resources: ResourceRegistry,
        progress: Arc<ProgressManager>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
            prompts: Arc::new(prompts),
            resources: Arc::new(resources),
            progress,
            name: name.into(),
            version: VERSION.to_string(),
        }
    }

    /// Run the server with the given transport until the peer disconnects.
    pub async fn run<T: Transport>(&self, mut transport: T) -> Result<()> {
        info!("Starting MCP server: {} v{}", self.name, self.version);

        let (mut incoming, outgoing) = transport.start().await?;

        // Pump progress notifications to the outgoing transport.
        let progress_rx = self.progress.receiver();
        let progress_out = outgoing.clone();
        tokio::spawn(async move {
            loop {
                let notification = {
                    let mut rx = progress_rx.lock().await;
                    rx.recv().await
                };
                match notification {
                    Some(n) => {
                        let msg = Message::Notification(n.into());
                        if progress_out.send(msg).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        });

        while let Some(msg) = incoming.recv().await {
            match msg {
                Message::Request(req) => {
                    let response = self.handle_request(req).await;
                    if outgoing.send(Message::Response(response)).await.is_err() {
                        error!("Failed to send response");
                        break;
                    }
                }
                Message::Notification(notif) => {
                    self.handle_notification(notif);
                }
                Message::Response(_) => {
                    warn!("Received unexpected response");
                }
            }
        }

        transport.stop().await?;
        info!("MCP server stopped");
        Ok(())
    }

    /// Handle a JSON-RPC request.
    async fn handle_request(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling request: {} (id: {:?})", req.method, req.id);

        let result = match req.method.as_str() {
            // Core
            "initialize" => self.handle_initialize(),
            "ping" => Ok(serde_json::json!({})),
            // Tools
            "tools/list" => self.handle_list_tools(),
            "tools/call" => self.handle_call_tool(req.params).await,
            // Prompts
            "prompts/list" => self.handle_list_prompts(),
            "prompts/get" => self.handle_get_prompt(req.params),
            // Resources
            "resources/list" => self.handle_list_resources(),
            "resources/templates/list" => self.handle_list_resource_templates(),
            "resources/read" => self.handle_read_resource(req.params),
            // Unknown
            _ => Err(Error::McpProtocol(format!(
                "Unknown method: {}",
                req.method
            ))),
        };

        match result {
            Ok(value) => JsonRpcResponse {
                jsonrpc: JSONRPC_VERSION.to_string(),
                id: req.id,
                result: Some(value),
                error: None,
            },
            Err(e) => JsonRpcResponse {
                jsonrpc: JSONRPC_VERSION.to_string(),
                id: req.id,
                result: None,
                error: Some(JsonRpcError {
                    code: error_code_for(&e),
                    message: e.to_string(),
                    data: None,
                }),
            },
        }
    }

    /// Handle a notification.
    fn handle_notification(&self, notif: JsonRpcNotification) {
        match notif.method.as_str() {
            "notifications/initialized" => {
                info!("Client initialized");
            }
            _ => {
                debug!("Ignoring notification: {}", notif.method);
            }
        }
    }

    fn handle_initialize(&self) -> Result<Value> {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
                resources: if self.resources.is_empty() {
                    None
                } else {
                    Some(ResourcesCapability::default())
                },
                prompts: Some(PromptsCapability {
                    list_changed: false,
                }),
                logging: Some(LoggingCapability {}),
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: self.version.clone(),
            },
        };

        Ok(serde_json::to_value(result)?)
    }

    fn handle_list_tools(&self) -> Result<Value> {
        let tools = self.handler.list_tools();
        Ok(serde_json::to_value(ListToolsResult { tools })?)
    }

    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value> {
        let params: CallToolParams = parse_params(params)?;

        let handler = self
            .handler
            .get_tool(&params.name)
            .ok_or_else(|| Error::ToolNotFound(params.name.clone()))?;

        let result = handler.execute(params.arguments).await?;
        Ok(serde_json::to_value(result)?)
    }

    fn handle_list_prompts(&self) -> Result<Value> {
        let result = ListPromptsResult {
            prompts: self.prompts.list(),
        };
        Ok(serde_json::to_value(result)?)
    }

    fn handle_get_prompt(&self, params: Option<Value>) -> Result<Value> {
        #[derive(serde::Deserialize)]
        struct GetPromptParams {
            name: String,
            #[serde(default)]
            arguments: HashMap<String, String>,
        }

        let params: GetPromptParams = parse_params(params)?;
        let result = self.prompts.get(&params.name, &params.arguments)?;
        Ok(serde_json::to_value(result)?)
    }

    fn handle_list_resources(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.resources.list())?)
    }

    fn handle_list_resource_templates(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.resources.templates())?)
    }

    fn handle_read_resource(&self, params: Option<Value>) -> Result<Value> {
        #[derive(serde::Deserialize)]
        struct ReadParams {
            uri: String,
        }

        let params: ReadParams = parse_params(params)?;
        let result = self.resources.read(&params.uri)?;
        Ok(serde_json::to_value(result)?)
    }
}

/// Deserialize request params, rejecting absent or malformed ones.
fn parse_params<P: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<P> {
    params
        .ok_or_else(|| Error::InvalidToolArguments("Missing params".to_string()))
        .and_then(|v| {
            serde_json::from_value(v).map_err(|e| Error::InvalidToolArguments(e.to_string()))
        })
}

/// JSON-RPC error code for an internal error.
fn error_code_for(err: &Error) -> i32 {
    match err {
        Error::McpProtocol(msg) if msg.starts_with("Unknown method") => {
            error_codes::METHOD_NOT_FOUND
        }
        Error::InvalidToolArguments(_) => error_codes::INVALID_PARAMS,
        _ => error_codes::INTERNAL_ERROR,
    }
}
