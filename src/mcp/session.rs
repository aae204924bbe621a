//! Session registry for the legacy SSE transport.
//!
//! Maps a server-generated session id to the send end of that session's
//! inbound message channel. The registry is owned by the composition root
//! and injected into both transport adapters; entries are inserted when a
//! client opens `/sse` and removed - idempotently - when the session driver
//! exits, whichever path triggered closure.

use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use crate::error::{Error, Result};
use crate::mcp::protocol::IncomingMessage;

/// Process-wide registry of live SSE sessions.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, mpsc::Sender<IncomingMessage>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new session's inbound channel.
    pub async fn register(&self, id: String, inbound: mpsc::Sender<IncomingMessage>) {
        debug!(session_id = %id, "Session registered");
        self.sessions.write().await.insert(id, inbound);
    }

    /// Remove a session. Safe to call for ids already removed.
    pub async fn remove(&self, id: &str) {
        if self.sessions.write().await.remove(id).is_some() {
            debug!(session_id = %id, "Session removed");
        }
    }

    /// Enqueue one inbound message for a session.
    ///
    /// The sender is cloned under the lock and the send happens outside it,
    /// so a concurrent removal cannot race the lookup; a send to a closed
    /// channel (driver already gone) reports the session as missing.
    pub async fn enqueue(&self, id: &str, message: IncomingMessage) -> Result<()> {
        let sender = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

        sender
            .send(message)
            .await
            .map_err(|_| Error::SessionNotFound(id.to_string()))
    }

    /// Ids of all live sessions.
    pub async fn ids(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
