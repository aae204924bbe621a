//! Mock MCP Server
//!
//! A test double for Model Context Protocol clients. Serves canned tool
//! responses over two transports:
//!
//! 1. **Streamable HTTP** (`POST /mcp`) - stateless; each request yields one
//!    SSE-formatted response stream scoped to that request
//! 2. **SSE** (`GET /sse` + `POST /message/{session_id}`) - legacy session
//!    model with a long-lived event stream and a side-channel POST endpoint
//!
//! # Architecture
//!
//! - `mcp` - JSON-RPC protocol types, method routing, progress relay,
//!   stream composition, session registry
//! - `tools` - reference tool handlers (arithmetic, greeting, fake search)
//! - `http` - axum transport adapters plus the guardrail and file-echo
//!   collaborator endpoints
//! - `config` - CLI arguments and server configuration

pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod tools;

pub use error::{Error, Result};

/// Server version reported in `initialize` responses.
pub const VERSION: &str = "1.0.0";

/// Server name reported in `initialize` responses.
pub const SERVER_NAME: &str = "mock-mcp-server";
