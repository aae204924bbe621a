//! Progress relay for long-running tool invocations.
//!
//! Each invocation gets its own FIFO channel: the tool handler holds the
//! send end (wrapped in a [`ProgressReporter`]), the stream composer holds
//! the receive end and interleaves drained notifications with the final
//! response.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Progress token correlating notifications with the originating call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ProgressToken {
    String(String),
    Number(i64),
}

/// Progress notification params. The token is skipped entirely when the
/// client did not supply one - it is never serialized as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressParams {
    pub progress: u64,
    pub total: u64,
    pub message: String,
    #[serde(
        rename = "progressToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub progress_token: Option<ProgressToken>,
}

/// Progress notification message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: ProgressParams,
}

impl ProgressNotification {
    pub fn new(
        token: Option<ProgressToken>,
        progress: u64,
        total: u64,
        message: String,
    ) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: "notifications/progress".to_string(),
            params: ProgressParams {
                progress,
                total,
                message,
                progress_token: token,
            },
        }
    }
}

/// Send end of an invocation's progress channel, handed to tool handlers.
///
/// The channel is unbounded so a handler never blocks on a slow consumer;
/// send failures mean the invocation was abandoned and are ignored.
#[derive(Clone)]
pub struct ProgressReporter {
    token: Option<ProgressToken>,
    sender: mpsc::UnboundedSender<ProgressNotification>,
}

impl ProgressReporter {
    pub fn new(
        token: Option<ProgressToken>,
        sender: mpsc::UnboundedSender<ProgressNotification>,
    ) -> Self {
        Self { token, sender }
    }

    /// Emit one progress notification carrying this reporter's token.
    pub fn report(&self, progress: u64, total: u64, message: impl Into<String>) {
        let notification =
            ProgressNotification::new(self.token.clone(), progress, total, message.into());
        let _ = self.sender.send(notification);
    }

    /// The correlation token, if the client supplied one.
    pub fn token(&self) -> Option<&ProgressToken> {
        self.token.as_ref()
    }
}
