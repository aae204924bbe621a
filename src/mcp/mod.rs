//! Model Context Protocol (MCP) implementation.
//!
//! # Architecture
//!
//! - `protocol` - JSON-RPC and MCP message types
//! - `handler` - tool handler trait and registry
//! - `progress` - per-invocation progress relay
//! - `router` - JSON-RPC method routing
//! - `compose` - interleaves progress frames with the final response
//! - `session` - session registry for the legacy SSE transport

pub mod compose;
pub mod handler;
pub mod progress;
pub mod protocol;
pub mod router;
pub mod session;

pub use compose::{compose, SseFrame};
pub use handler::{ToolHandler, ToolRegistry};
pub use progress::{ProgressNotification, ProgressReporter, ProgressToken};
pub use protocol::*;
pub use router::MethodRouter;
pub use session::SessionRegistry;
