//! Mock MCP Server
//!
//! Serves canned MCP tool responses over Streamable HTTP and legacy SSE
//! transports, for testing client implementations.

use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mock_mcp_server::config::{Args, Config};
use mock_mcp_server::error::Result;
use mock_mcp_server::http::{self, AppState};
use mock_mcp_server::mcp::handler::ToolRegistry;
use mock_mcp_server::mcp::protocol::ServerInfo;
use mock_mcp_server::mcp::router::MethodRouter;
use mock_mcp_server::mcp::session::SessionRegistry;
use mock_mcp_server::tools;
use mock_mcp_server::{SERVER_NAME, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let config: Config = args.into();

    let mut registry = ToolRegistry::new();
    tools::register_all_tools(&mut registry);

    info!("Mock MCP Server v{}", VERSION);
    info!(
        "Streamable HTTP (recommended): http://{}:{}/mcp",
        config.host, config.port
    );
    info!(
        "SSE (legacy):                  http://{}:{}/sse",
        config.host, config.port
    );
    info!(
        "Guardrail:                     http://{}:{}/guardrail",
        config.host, config.port
    );
    info!(
        "Health check:                  http://{}:{}/health",
        config.host, config.port
    );
    info!("Registered {} tools:", registry.tool_count());
    for tool in registry.list_tools() {
        info!("  - {}: {}", tool.name, tool.description);
    }

    let router = MethodRouter::new(
        registry,
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: VERSION.to_string(),
        },
    );

    let state = AppState::new(
        Arc::new(router),
        Arc::new(SessionRegistry::new()),
        Arc::new(config.clone()),
    );

    http::start_server(&config, state).await
}
