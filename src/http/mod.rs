//! HTTP surface: transport adapters plus collaborator endpoints.
//!
//! Routes:
//! - `POST /mcp` - stateless Streamable HTTP transport
//! - `GET /sse` + `POST /message/{session_id}` - legacy SSE transport
//! - `GET /` and `GET /health` - server descriptor and health
//! - `POST /guardrail`, `POST /files` - test collaborators

pub mod files;
pub mod guardrail;
pub mod sse;
pub mod streamable;

use axum::{
    extract::State,
    http::HeaderMap,
    response::sse::Event,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::mcp::compose::SseFrame;
use crate::mcp::protocol::MCP_VERSION;
use crate::mcp::router::MethodRouter;
use crate::mcp::session::SessionRegistry;
use crate::VERSION;

/// Shared server state, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<MethodRouter>,
    pub sessions: Arc<SessionRegistry>,
    pub config: Arc<Config>,
    /// Process-wide counter behind the guardrail's alternating FILE verdicts.
    pub guardrail_file_calls: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(
        router: Arc<MethodRouter>,
        sessions: Arc<SessionRegistry>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            router,
            sessions,
            config,
            guardrail_file_calls: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// Build the axum application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/mcp", post(streamable::mcp_endpoint))
        .route("/sse", get(sse::sse_endpoint))
        .route("/message/{session_id}", post(sse::message_endpoint))
        .route("/guardrail", post(guardrail::guardrail_endpoint))
        .route("/files", post(files::files_endpoint))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn start_server(config: &Config, state: AppState) -> Result<()> {
    let addr = config.bind_addr();
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Server descriptor.
async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Mock MCP Server",
        "version": VERSION,
        "protocol": format!("MCP {}", MCP_VERSION),
        "transport": ["Streamable HTTP", "SSE"],
        "endpoints": {
            "mcp": "/mcp (recommended)",
            "sse": "/sse (legacy)"
        }
    }))
}

/// Health check with the live session listing.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "active_sessions": state.sessions.count().await,
        "sessions": state.sessions.ids().await,
    }))
}

/// Convert an outbound frame into a wire event.
pub(crate) fn to_event(frame: SseFrame) -> Event {
    match frame {
        SseFrame::Message(json) => Event::default().event("message").data(json),
        SseFrame::Endpoint(path) => Event::default().event("endpoint").data(path),
        SseFrame::KeepAlive => Event::default().comment("keep-alive"),
    }
}

/// Headers whose values are masked to a prefix in logs.
const MASKED_HEADERS: [&str; 2] = ["authorization", "x-api-key"];

/// Log request headers at debug level. Auth-related values are masked to a
/// 20-char prefix plus length; nothing here is ever enforced.
pub(crate) fn log_request_headers(route: &str, headers: &HeaderMap) {
    for (name, value) in headers {
        let shown = match value.to_str() {
            Ok(v) if MASKED_HEADERS.contains(&name.as_str()) && v.len() > 20 => {
                format!("{}...({} chars)", &v[..20], v.len())
            }
            Ok(v) => v.to_string(),
            Err(_) => "<non-ascii>".to_string(),
        };
        debug!(route, header = %name, value = %shown, "Request header");
    }
}
