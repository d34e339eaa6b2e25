//! MCP server integration tests.
//!
//! Spawns the real binary and speaks JSON-RPC over stdio, the same way an
//! MCP client would.

#![allow(deprecated)] // Allow deprecated cargo_bin for now

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// MCP test client that communicates with the server via stdio.
struct McpTestClient {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    request_id: i64,
}

impl McpTestClient {
    /// Spawn a new MCP server and connect to it.
    fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
        let mut child = Command::cargo_bin("mcp-playground")?
            .arg("serve")
            .arg("--transport")
            .arg("stdio")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take().expect("Failed to get stdin");
        let stdout = BufReader::new(child.stdout.take().expect("Failed to get stdout"));

        Ok(Self {
            child,
            stdin,
            stdout,
            request_id: 0,
        })
    }

    /// Send a JSON-RPC request and get the response.
    fn request(
        &mut self,
        method: &str,
        params: Value,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        self.request_id += 1;
        let request = json!({
            "jsonrpc": "2.0",
            "id": self.request_id,
            "method": method,
            "params": params
        });

        writeln!(self.stdin, "{}", serde_json::to_string(&request)?)?;
        self.stdin.flush()?;

        // Skip any notifications interleaved before the matching response.
        loop {
            let mut line = String::new();
            self.stdout.read_line(&mut line)?;
            let message: Value = serde_json::from_str(&line)?;
            if message.get("id").is_some() {
                return Ok(message);
            }
        }
    }

    fn initialize(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        self.request(
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test-client", "version": "1.0.0" }
            }),
        )
    }

    fn call_tool(
        &mut self,
        name: &str,
        arguments: Value,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        self.request("tools/call", json!({ "name": name, "arguments": arguments }))
    }
}

impl Drop for McpTestClient {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

fn result_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("Expected text content")
}

// ============================================================================
// Integration tests
// ============================================================================

#[test]
fn test_binary_help() {
    AssertCommand::cargo_bin("mcp-playground")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tutorial MCP server"));
}

#[test]
fn test_binary_version() {
    AssertCommand::cargo_bin("mcp-playground")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mcp-playground"));
}

#[test]
fn test_mcp_initialize() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");

    let response = client.initialize().expect("Failed to initialize");
    let result = &response["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "mcp-playground");
    assert!(result.get("capabilities").is_some(), "Expected capabilities");
}

#[test]
fn test_mcp_list_tools() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .request("tools/list", json!({}))
        .expect("Failed to list tools");
    let tools = response["result"]["tools"]
        .as_array()
        .expect("tools should be array");

    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert!(names.contains(&"add"), "Expected add tool");
    assert!(names.contains(&"greet"), "Expected greet tool");
    assert!(names.contains(&"listPets"), "Expected listPets tool");
}

#[test]
fn test_mcp_call_add() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .call_tool("add", json!({ "a": 2, "b": 3 }))
        .expect("Failed to call add");
    assert_eq!(result_text(&response), "5");
}

#[test]
fn test_mcp_call_greet() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .call_tool("greet", json!({ "name": "Ford" }))
        .expect("Failed to call greet");
    assert_eq!(result_text(&response), "Hello, Ford!");
}

#[test]
fn test_mcp_read_greeting_resource() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .request("resources/read", json!({ "uri": "greeting://World" }))
        .expect("Failed to read resource");
    let contents = response["result"]["contents"]
        .as_array()
        .expect("contents should be array");
    assert_eq!(contents[0]["text"], "Hello, World!");
}

#[test]
fn test_mcp_get_prompt() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .request(
            "prompts/get",
            json!({
                "name": "ask_review",
                "arguments": { "code_snippet": "fn main() {}" }
            }),
        )
        .expect("Failed to get prompt");
    let messages = response["result"]["messages"]
        .as_array()
        .expect("messages should be array");
    assert_eq!(messages.len(), 1);
    let text = messages[0]["content"]["text"].as_str().expect("text");
    assert!(text.contains("fn main() {}"));
}

#[test]
fn test_mcp_unknown_tool() {
    let mut client = McpTestClient::spawn().expect("Failed to spawn MCP server");
    client.initialize().expect("Failed to initialize");

    let response = client
        .call_tool("nonexistent_tool", json!({}))
        .expect("Failed to call tool");
    assert!(
        response.get("error").is_some(),
        "Expected error for unknown tool"
    );
}
