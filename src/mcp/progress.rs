//! MCP progress notifications.
//!
//! Long-running tools report progress through a [`ProgressReporter`]; the
//! server pumps the resulting notifications to the outgoing transport.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::mcp::protocol::{JsonRpcNotification, JSONRPC_VERSION};

/// Progress token for tracking operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ProgressToken {
    String(String),
    Number(i64),
}

/// Progress notification params.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressParams {
    pub progress_token: ProgressToken,
    pub progress: u64,
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Progress notification message.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: ProgressParams,
}

impl ProgressNotification {
    /// Build a `notifications/progress` message.
    pub fn new(
        token: ProgressToken,
        progress: u64,
        total: Option<u64>,
        message: Option<String>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: "notifications/progress".to_string(),
            params: ProgressParams {
                progress_token: token,
                progress,
                total,
                message,
            },
        }
    }
}

impl From<ProgressNotification> for JsonRpcNotification {
    fn from(notification: ProgressNotification) -> Self {
        Self {
            jsonrpc: notification.jsonrpc,
            method: notification.method,
            params: serde_json::to_value(notification.params).ok(),
        }
    }
}

/// Progress reporter for emitting updates from inside a tool.
#[derive(Clone)]
pub struct ProgressReporter {
    token: ProgressToken,
    sender: mpsc::Sender<ProgressNotification>,
    total: Option<u64>,
}

impl ProgressReporter {
    /// Create a reporter bound to a token and notification channel.
    pub fn new(
        token: ProgressToken,
        sender: mpsc::Sender<ProgressNotification>,
        total: Option<u64>,
    ) -> Self {
        Self {
            token,
            sender,
            total,
        }
    }

    /// Send one progress update.
    ///
    /// Updates are dropped rather than awaited when the channel is full or
    /// closed, so a tool never stalls on a transport that does not drain
    /// progress notifications.
    pub async fn report(&self, progress: u64, message: Option<&str>) {
        let notification = ProgressNotification::new(
            self.token.clone(),
            progress,
            self.total,
            message.map(String::from),
        );
        let _ = self.sender.try_send(notification);
    }

    /// Report completion (progress == total), if a total is configured.
    pub async fn complete(&self, message: Option<&str>) {
        if let Some(total) = self.total {
            self.report(total, message).await;
        }
    }
}

/// Creates reporters and owns the notification channel.
pub struct ProgressManager {
    sender: mpsc::Sender<ProgressNotification>,
    receiver: Arc<Mutex<mpsc::Receiver<ProgressNotification>>>,
    next_id: AtomicI64,
}

impl ProgressManager {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(100);
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a reporter with a fresh numeric token.
    pub fn create_reporter(&self, total: Option<u64>) -> ProgressReporter {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        ProgressReporter::new(ProgressToken::Number(id), self.sender.clone(), total)
    }

    /// Shared handle to the notification receiver (consumed by the server's
    /// progress pump).
    pub fn receiver(&self) -> Arc<Mutex<mpsc::Receiver<ProgressNotification>>> {
        self.receiver.clone()
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}
