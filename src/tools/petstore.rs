//! Pet-store client adapter.
//!
//! Generates one MCP tool per operation declared in an [`ApiSpec`]. Each
//! generated tool substitutes path parameters, forwards the declared body
//! fields untouched, and performs the HTTP call; validation stays with the
//! pet-store service.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::apispec::{ApiOperation, ApiSpec, HttpMethod};
use crate::error::{Error, Result};
use crate::mcp::handler::{error_result, success_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};

/// Request timeout for adapter calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Characters that must be escaped inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// An MCP tool generated from one declared API operation.
pub struct ApiTool {
    operation: ApiOperation,
    base_url: String,
    client: reqwest::Client,
}

/// Generate a tool per operation in the spec.
pub fn bind_tools(spec: &ApiSpec, base_url: &str) -> Result<Vec<Arc<dyn ToolHandler>>> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(Error::Http)?;

    let base_url = base_url.trim_end_matches('/').to_string();

    Ok(spec
        .operations
        .iter()
        .map(|operation| {
            Arc::new(ApiTool {
                operation: operation.clone(),
                base_url: base_url.clone(),
                client: client.clone(),
            }) as Arc<dyn ToolHandler>
        })
        .collect())
}

impl ApiTool {
    /// Substitute path parameters from the call arguments.
    fn render_path(&self, args: &HashMap<String, Value>) -> Result<String> {
        let mut params = HashMap::new();
        for field in &self.operation.path_params {
            let value = args.get(&field.name).ok_or_else(|| {
                Error::InvalidToolArguments(format!("Missing required argument: {}", field.name))
            })?;
            let raw = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let encoded = utf8_percent_encode(&raw, PATH_SEGMENT).to_string();
            params.insert(field.name.clone(), encoded);
        }
        Ok(self.operation.path.render(&params))
    }

    /// Collect the declared body fields present in the call arguments.
    fn body(&self, args: &HashMap<String, Value>) -> Value {
        let mut body = serde_json::Map::new();
        for field in &self.operation.body_fields {
            if let Some(value) = args.get(&field.name) {
                body.insert(field.name.clone(), value.clone());
            }
        }
        Value::Object(body)
    }
}

#[async_trait]
impl ToolHandler for ApiTool {
    fn definition(&self) -> Tool {
        Tool {
            name: self.operation.id.clone(),
            description: self.operation.summary.clone(),
            input_schema: self.operation.input_schema(),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let path = self.render_path(&args)?;
        let url = format!("{}{}", self.base_url, path);

        let request = match self.operation.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url).json(&self.body(&args)),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Ok(error_result(format!("Request failed: {}", e))),
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            // Re-serialize compactly when the body is JSON.
            let body = serde_json::from_str::<Value>(&text)
                .map(|v| v.to_string())
                .unwrap_or(text);
            Ok(success_result(body))
        } else {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(text);
            Ok(error_result(format!("{}: {}", status.as_u16(), message)))
        }
    }
}
