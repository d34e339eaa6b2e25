//! Client for an external text-completion API.
//!
//! One blocking-style call per request with a fixed timeout. No retries or
//! backoff; failures surface immediately to the caller.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::error::{Error, Result};

/// Request timeout for completion calls.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(10);

/// Text-completion client.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

impl CompletionClient {
    /// Create a client for the given API endpoint.
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(COMPLETION_TIMEOUT)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        })
    }

    /// Send one completion request and return the completion text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/completions", self.api_url);
        let mut request = self.http.post(&url).json(&json!({
            "model": self.model,
            "prompt": prompt,
            "max_tokens": 16,
        }));

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpServer(format!(
                "completion API returned {}: {}",
                status, body
            )));
        }

        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| Error::HttpServer("completion API returned no choices".to_string()))
    }
}
