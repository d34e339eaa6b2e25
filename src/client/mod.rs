//! Toy MCP client.
//!
//! Spawns a server subprocess and speaks newline-delimited JSON-RPC over its
//! stdio. Enough of the protocol for the demos: initialize, list/call tools,
//! read resources, and fetch prompts.

use serde_json::{json, Value};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

use crate::error::{Error, Result};
use crate::mcp::prompts::GetPromptResult;
use crate::mcp::protocol::{
    JsonRpcNotification, JsonRpcRequest, ListToolsResult, RequestId, Tool, ToolResult,
    JSONRPC_VERSION, MCP_VERSION,
};
use crate::mcp::resources::ReadResourceResult;
use crate::mcp::transport::Message;
use crate::VERSION;

/// MCP client over a child process's stdio.
pub struct McpClient {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: i64,
}

impl McpClient {
    /// Spawn the server command and attach to its stdio.
    ///
    /// The child's stderr is inherited so server logs stay visible.
    pub async fn spawn(program: &str, args: &[&str]) -> Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Client("Failed to open child stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Client("Failed to open child stdout".to_string()))?;

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            next_id: 0,
        })
    }

    /// Perform the initialize handshake and acknowledge it.
    pub async fn initialize(&mut self) -> Result<Value> {
        let result = self
            .request(
                "initialize",
                Some(json!({
                    "protocolVersion": MCP_VERSION,
                    "capabilities": {},
                    "clientInfo": { "name": "mcp-playground-client", "version": VERSION }
                })),
            )
            .await?;

        self.notify("notifications/initialized", None).await?;
        Ok(result)
    }

    /// List the server's tools.
    pub async fn list_tools(&mut self) -> Result<Vec<Tool>> {
        let result = self.request("tools/list", None).await?;
        let parsed: ListToolsResult = serde_json::from_value(result)?;
        Ok(parsed.tools)
    }

    /// Call a tool by name.
    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<ToolResult> {
        let result = self
            .request(
                "tools/call",
                Some(json!({ "name": name, "arguments": arguments })),
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Read a resource by URI.
    pub async fn read_resource(&mut self, uri: &str) -> Result<ReadResourceResult> {
        let result = self
            .request("resources/read", Some(json!({ "uri": uri })))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Fetch a prompt with arguments.
    pub async fn get_prompt(&mut self, name: &str, arguments: Value) -> Result<GetPromptResult> {
        let result = self
            .request(
                "prompts/get",
                Some(json!({ "name": name, "arguments": arguments })),
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Close stdin and wait for the server to exit.
    pub async fn shutdown(mut self) -> Result<()> {
        drop(self.stdin);
        self.child.wait().await?;
        Ok(())
    }

    /// Send a request and wait for its response, skipping notifications
    /// (e.g. progress updates) that arrive in between.
    async fn request(&mut self, method: &str, params: Option<Value>) -> Result<Value> {
        self.next_id += 1;
        let id = RequestId::Number(self.next_id);

        let request = Message::Request(JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.clone(),
            method: method.to_string(),
            params,
        });
        self.send(&request).await?;

        loop {
            let mut line = String::new();
            let read = self.stdout.read_line(&mut line).await?;
            if read == 0 {
                return Err(Error::Client("Server closed the connection".to_string()));
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match Message::parse(trimmed) {
                Some(Message::Response(res)) if res.id == id => {
                    if let Some(err) = res.error {
                        return Err(Error::Client(err.message));
                    }
                    return Ok(res.result.unwrap_or_else(|| json!({})));
                }
                Some(Message::Notification(notif)) => {
                    debug!("Notification from server: {}", notif.method);
                }
                Some(other) => {
                    debug!("Ignoring unexpected message: {:?}", other);
                }
                None => {
                    return Err(Error::Client(format!("Unparseable message: {}", trimmed)));
                }
            }
        }
    }

    /// Send a notification (no response expected).
    async fn notify(&mut self, method: &str, params: Option<Value>) -> Result<()> {
        let notification = Message::Notification(JsonRpcNotification {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
        });
        self.send(&notification).await
    }

    async fn send(&mut self, message: &Message) -> Result<()> {
        let line = message.to_json()?;
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_message_shape() {
        let request = Message::Request(JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: RequestId::Number(1),
            method: "tools/list".to_string(),
            params: None,
        });

        let line = request.to_json().unwrap();
        assert!(line.contains("\"method\":\"tools/list\""));
        assert!(!line.contains('\n'));
    }
}
