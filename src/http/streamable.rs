//! Streamable HTTP transport adapter.
//!
//! Stateless: one POST carries one JSON-RPC message, and the response is
//! one SSE-formatted stream scoped to that request. No session id, no
//! keep-alive; the stream closes when the invocation's last frame is out.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{sse::Sse, IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde_json::json;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use crate::http::{log_request_headers, to_event, AppState};
use crate::mcp::compose::compose;
use crate::mcp::protocol::IncomingMessage;

pub async fn mcp_endpoint(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: Bytes,
) -> Response {
    log_request_headers("/mcp", &headers);

    let message: IncomingMessage = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            debug!("JSON parse error on /mcp: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": format!("Invalid JSON: {}", e)})),
            )
                .into_response();
        }
    };

    let (frame_tx, frame_rx) = mpsc::channel(32);
    let router = state.router.clone();
    tokio::spawn(async move {
        // A send failure here means the client went away; the invocation
        // itself already ran (or is still running detached).
        if let Err(e) = compose(router, message, &frame_tx).await {
            debug!("Streamable request ended early: {}", e);
        }
    });

    let stream = ReceiverStream::new(frame_rx).map(|frame| Ok::<_, Infallible>(to_event(frame)));

    let mut response = Sse::new(stream).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response_headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    response_headers.insert(
        HeaderName::from_static("x-accel-buffering"),
        HeaderValue::from_static("no"),
    );
    response
}
