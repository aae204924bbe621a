//! Toy content-guardrail endpoint.
//!
//! INPUT/OUTPUT checks are a deterministic keyword scan; FILE checks
//! alternate pass/block on a process-wide counter so a client can exercise
//! both verdicts without crafting special payloads.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use tracing::{debug, info};

use crate::http::{log_request_headers, AppState};

/// Keyword that blocks INPUT/OUTPUT content.
const BLOCKED_KEYWORD: &str = "아이유";

/// Where the checked content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GuardrailSource {
    Input,
    Output,
    File,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct GuardrailRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source: GuardrailSource,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub file: Option<GuardrailFile>,
}

/// File attachment metadata; logged only.
#[derive(Debug, Deserialize)]
pub struct GuardrailFile {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub content_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GuardrailResponse {
    pub action: &'static str,
    pub is_safe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_reasons: Option<BlockedReasons>,
}

#[derive(Debug, Serialize)]
pub struct BlockedReasons {
    pub reason: String,
}

impl GuardrailResponse {
    fn safe() -> Self {
        Self {
            action: "NONE",
            is_safe: true,
            blocked_reasons: None,
        }
    }

    fn blocked(reason: impl Into<String>) -> Self {
        Self {
            action: "GUARDRAIL_INTERVENED",
            is_safe: false,
            blocked_reasons: Some(BlockedReasons {
                reason: reason.into(),
            }),
        }
    }
}

pub async fn guardrail_endpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    log_request_headers("/guardrail", &headers);

    let payload: GuardrailRequest = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": format!("Invalid JSON: {}", e)})),
            )
                .into_response();
        }
    };

    debug!(source = ?payload.source, metadata = %payload.metadata, "Guardrail check");
    if let Some(file) = &payload.file {
        debug!(
            filename = ?file.filename,
            mimetype = ?file.mimetype,
            content_chars = file.content_base64.as_deref().map(str::len).unwrap_or(0),
            "Guardrail file attachment"
        );
    }

    let response = match payload.source {
        GuardrailSource::File => {
            // Alternation is global to the process, not per-session: every
            // even-numbered FILE call (1-indexed) is blocked.
            let count = state.guardrail_file_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if count % 2 == 0 {
                info!(count, "File guardrail blocked (simulated failure)");
                GuardrailResponse::blocked("File guardrail blocked (simulated failure)")
            } else {
                info!(count, "File guardrail passed");
                GuardrailResponse::safe()
            }
        }
        _ => {
            if payload.text.contains(BLOCKED_KEYWORD) {
                info!("Guardrail blocked: keyword detected");
                GuardrailResponse::blocked(format!(
                    "Content about '{}' is not allowed.",
                    BLOCKED_KEYWORD
                ))
            } else {
                GuardrailResponse::safe()
            }
        }
    };

    Json(response).into_response()
}
