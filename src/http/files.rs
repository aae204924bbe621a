//! File-echo endpoint.
//!
//! Accepts a multipart upload and returns the bytes unchanged with the
//! original content type, so a client can verify its file plumbing
//! end to end.

use axum::{
    body::Body,
    extract::Multipart,
    http::{header, HeaderMap, Response as HttpResponse, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

use crate::http::log_request_headers;

pub async fn files_endpoint(headers: HeaderMap, mut multipart: Multipart) -> Response {
    log_request_headers("/files", &headers);

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": format!("Invalid multipart body: {}", e)})),
                )
                    .into_response();
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": format!("Failed to read file field: {}", e)})),
                )
                    .into_response();
            }
        };

        debug!(
            filename = %filename,
            content_type = %content_type,
            size = bytes.len(),
            "Echoing uploaded file"
        );

        return match HttpResponse::builder()
            .header(header::CONTENT_TYPE, content_type.as_str())
            .header("X-Filename", filename.as_str())
            .body(Body::from(bytes))
        {
            Ok(response) => response,
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": format!("Failed to build response: {}", e)})),
            )
                .into_response(),
        };
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "'file' field is required"})),
    )
        .into_response()
}
