//! Configuration management for the mock MCP server.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Command-line arguments for the mock MCP server.
#[derive(Parser, Debug, Clone)]
#[command(name = "mock-mcp-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mock MCP server exercising SSE and Streamable HTTP transports")]
pub struct Args {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "MOCK_MCP_HOST")]
    pub host: String,

    /// HTTP port
    #[arg(short, long, default_value = "8000", env = "MOCK_MCP_PORT")]
    pub port: u16,

    /// Enable debug logging
    #[arg(short, long, env = "MOCK_MCP_DEBUG")]
    pub debug: bool,

    /// Seconds an idle SSE session waits for a message before emitting a
    /// keep-alive comment
    #[arg(long, default_value = "30", env = "MOCK_MCP_SESSION_TIMEOUT")]
    pub session_timeout: u64,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// Debug mode
    pub debug: bool,
    /// Idle wait before a keep-alive comment (seconds)
    pub session_timeout: u64,
}

impl Config {
    /// Idle session wait as a [`Duration`].
    pub fn session_wait(&self) -> Duration {
        Duration::from_secs(self.session_timeout)
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            debug: args.debug,
            session_timeout: args.session_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            debug: false,
            session_timeout: 30,
        }
    }
}
