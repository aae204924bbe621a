//! Legacy SSE transport adapter.
//!
//! A session is one long-lived `GET /sse` stream plus a side-channel
//! `POST /message/{session_id}` that enqueues inbound messages. Per
//! session the driver cycles WAITING -> PROCESSING -> STREAMING: it
//! blocks on the inbound channel (emitting a keep-alive comment on each
//! idle timeout), runs one message through the stream composer, and
//! re-waits. One message is fully resolved before the next is taken, so
//! a session serializes its own requests while distinct sessions run
//! concurrently.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{sse::Sse, IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde_json::json;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::http::{log_request_headers, to_event, AppState};
use crate::mcp::compose::{compose, SseFrame};
use crate::mcp::protocol::IncomingMessage;

pub async fn sse_endpoint(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    log_request_headers("/sse", &headers);

    let session_id = Uuid::new_v4().to_string();
    let (inbound_tx, inbound_rx) = mpsc::channel(100);
    state.sessions.register(session_id.clone(), inbound_tx).await;

    let (frame_tx, frame_rx) = mpsc::channel(32);
    tokio::spawn(drive_session(state, session_id, inbound_rx, frame_tx));

    let stream = ReceiverStream::new(frame_rx).map(|frame| Ok::<_, Infallible>(to_event(frame)));
    Sse::new(stream)
}

/// Run one session to completion, then tear down its registry entry.
async fn drive_session(
    state: AppState,
    session_id: String,
    mut inbound: mpsc::Receiver<IncomingMessage>,
    out: mpsc::Sender<SseFrame>,
) {
    info!(session_id = %session_id, "SSE session started");

    match session_loop(&state, &session_id, &mut inbound, &out).await {
        Ok(()) => {}
        Err(Error::Disconnected) => info!(session_id = %session_id, "SSE client disconnected"),
        Err(e) => error!(session_id = %session_id, "SSE session error: {}", e),
    }

    // CLOSED transition: remove unconditionally, whatever ended the loop.
    state.sessions.remove(&session_id).await;
    info!(session_id = %session_id, "SSE session closed");
}

async fn session_loop(
    state: &AppState,
    session_id: &str,
    inbound: &mut mpsc::Receiver<IncomingMessage>,
    out: &mpsc::Sender<SseFrame>,
) -> Result<()> {
    // Handshake: hand the client its POST-back path. A bare path, not an
    // absolute URL - clients resolve it against the connection origin.
    out.send(SseFrame::Endpoint(format!("/message/{}", session_id)))
        .await
        .map_err(|_| Error::Disconnected)?;

    loop {
        match timeout(state.config.session_wait(), inbound.recv()).await {
            Ok(Some(message)) => compose(state.router.clone(), message, out).await?,
            // Inbound channel closed: the registry entry is gone.
            Ok(None) => return Ok(()),
            // Idle: keep the connection alive, never close it.
            Err(_elapsed) => out
                .send(SseFrame::KeepAlive)
                .await
                .map_err(|_| Error::Disconnected)?,
        }
    }
}

pub async fn message_endpoint(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    log_request_headers("/message", &headers);

    let message: IncomingMessage = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": format!("Invalid JSON: {}", e)})),
            )
                .into_response();
        }
    };

    match state.sessions.enqueue(&session_id, message).await {
        // Accepted for processing; the response arrives on the SSE stream.
        Ok(()) => (StatusCode::ACCEPTED, Json(json!({"status": "accepted"}))).into_response(),
        Err(_) => {
            warn!(session_id = %session_id, "Message for unknown session");
            (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Session not found"})),
            )
                .into_response()
        }
    }
}
