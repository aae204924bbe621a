//! Stream composition for a single JSON-RPC invocation.
//!
//! Runs the router dispatch as a spawned task while concurrently draining
//! the invocation's progress relay, so progress notifications reach the
//! wire while the handler is still working. The final response is only
//! emitted after the relay is fully drained: within one invocation,
//! progress events keep their production order and the response is always
//! the last frame.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::{Error, Result};
use crate::mcp::protocol::IncomingMessage;
use crate::mcp::router::MethodRouter;

/// One outbound SSE frame. Transport adapters convert these to wire
/// events; the composer itself only ever produces `Message` frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// A `message` event wrapping a serialized JSON-RPC payload.
    Message(String),
    /// The `endpoint` handshake event of an SSE session; data is the bare
    /// POST-back path.
    Endpoint(String),
    /// A keep-alive comment.
    KeepAlive,
}

/// Run one inbound message to completion, emitting progress frames and the
/// final response (if any) onto `out`.
///
/// Returns [`Error::Disconnected`] when the outbound channel is closed
/// mid-stream. The spawned dispatch task is deliberately not cancelled in
/// that case: it runs to completion and its remaining progress sends go
/// nowhere.
pub async fn compose(
    router: Arc<MethodRouter>,
    message: IncomingMessage,
    out: &mpsc::Sender<SseFrame>,
) -> Result<()> {
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();

    let mut task = tokio::spawn(async move { router.dispatch(message, progress_tx).await });

    let response = loop {
        tokio::select! {
            notification = progress_rx.recv() => match notification {
                Some(n) => emit(out, serde_json::to_string(&n)?).await?,
                // All senders dropped: the dispatch is wrapping up and can
                // produce no further progress.
                None => break task.await.map_err(|e| Error::Internal(e.to_string()))?,
            },
            joined = &mut task => {
                let resolved = joined.map_err(|e| Error::Internal(e.to_string()))?;
                // Drain whatever the handler enqueued before finishing, in
                // enqueue order, before the final response goes out.
                while let Ok(n) = progress_rx.try_recv() {
                    emit(out, serde_json::to_string(&n)?).await?;
                }
                break resolved;
            }
        }
    };

    if let Some(response) = response {
        emit(out, serde_json::to_string(&response)?).await?;
    }

    Ok(())
}

async fn emit(out: &mpsc::Sender<SseFrame>, payload: String) -> Result<()> {
    out.send(SseFrame::Message(payload)).await.map_err(|_| {
        warn!("Outbound stream closed mid-invocation");
        Error::Disconnected
    })
}
