//! JSON-RPC method routing.
//!
//! Decodes an inbound message's method and dispatches to the matching
//! handler. Notifications never produce a response; every request does,
//! even if only an error object. Handler failures are converted to
//! JSON-RPC errors here and never reach the transport as panics or raw
//! `Err` values.

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::mcp::handler::ToolRegistry;
use crate::mcp::progress::{ProgressNotification, ProgressReporter};
use crate::mcp::protocol::*;

/// Routes decoded JSON-RPC messages to the registered handlers.
pub struct MethodRouter {
    registry: ToolRegistry,
    server_info: ServerInfo,
}

impl MethodRouter {
    pub fn new(registry: ToolRegistry, server_info: ServerInfo) -> Self {
        Self {
            registry,
            server_info,
        }
    }

    /// Handle one inbound message. Returns `None` for notifications, for
    /// which no response may be emitted. `progress_tx` is the send end of
    /// the calling invocation's progress relay.
    pub async fn dispatch(
        &self,
        message: IncomingMessage,
        progress_tx: mpsc::UnboundedSender<ProgressNotification>,
    ) -> Option<JsonRpcResponse> {
        match message {
            IncomingMessage::Request(req) => Some(self.handle_request(req, progress_tx).await),
            IncomingMessage::Notification(notif) => {
                self.handle_notification(notif);
                None
            }
        }
    }

    async fn handle_request(
        &self,
        req: JsonRpcRequest,
        progress_tx: mpsc::UnboundedSender<ProgressNotification>,
    ) -> JsonRpcResponse {
        debug!(method = %req.method, id = ?req.id, "Handling request");

        let result = match req.method.as_str() {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_list_tools(),
            "tools/call" => self.handle_call_tool(req.params, progress_tx).await,
            other => Err(Error::MethodNotFound(other.to_string())),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(req.id, value),
            Err(e) => {
                let code = match e {
                    Error::MethodNotFound(_) | Error::UnknownTool(_) => {
                        error_codes::METHOD_NOT_FOUND
                    }
                    _ => error_codes::INTERNAL_ERROR,
                };
                JsonRpcResponse::error(req.id, code, e.to_string())
            }
        }
    }

    fn handle_notification(&self, notif: JsonRpcNotification) {
        match notif.method.as_str() {
            "notifications/initialized" => info!("Client initialized"),
            other => debug!(method = %other, "Ignoring notification"),
        }
    }

    fn handle_initialize(&self) -> Result<Value> {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: self.server_info.clone(),
        };
        Ok(serde_json::to_value(result)?)
    }

    fn handle_list_tools(&self) -> Result<Value> {
        let tools = self.registry.list_tools();
        Ok(serde_json::to_value(ListToolsResult { tools })?)
    }

    async fn handle_call_tool(
        &self,
        params: Option<Value>,
        progress_tx: mpsc::UnboundedSender<ProgressNotification>,
    ) -> Result<Value> {
        let params: CallToolParams = params
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        let handler = self
            .registry
            .get_tool(&params.name)
            .ok_or_else(|| Error::UnknownTool(params.name.clone()))?;

        let token = params.progress_token();
        debug!(tool = %params.name, token = ?token, "Calling tool");

        let reporter = ProgressReporter::new(token, progress_tx);
        let result = handler
            .execute(params.arguments, Some(reporter))
            .await
            .map_err(|e| Error::ToolExecution(e.to_string()))?;

        Ok(serde_json::to_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::handler::{text_result, ToolHandler};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;

    struct PingTool;

    #[async_trait]
    impl ToolHandler for PingTool {
        fn definition(&self) -> Tool {
            Tool {
                name: "ping".to_string(),
                description: "Replies with pong".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            }
        }

        async fn execute(
            &self,
            _args: HashMap<String, Value>,
            _progress: Option<ProgressReporter>,
        ) -> crate::Result<ToolResult> {
            Ok(text_result("pong"))
        }
    }

    struct FailingTool;

    #[async_trait]
    impl ToolHandler for FailingTool {
        fn definition(&self) -> Tool {
            Tool {
                name: "failing".to_string(),
                description: "Always fails".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            }
        }

        async fn execute(
            &self,
            _args: HashMap<String, Value>,
            _progress: Option<ProgressReporter>,
        ) -> crate::Result<ToolResult> {
            Err(Error::Internal("deliberate failure".to_string()))
        }
    }

    fn test_router() -> MethodRouter {
        let mut registry = ToolRegistry::new();
        registry.register(PingTool);
        registry.register(FailingTool);
        MethodRouter::new(
            registry,
            ServerInfo {
                name: "test-server".to_string(),
                version: "0.0.0".to_string(),
            },
        )
    }

    fn request(id: RequestId, method: &str, params: Value) -> IncomingMessage {
        IncomingMessage::Request(JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.to_string(),
            params: Some(params),
        })
    }

    #[tokio::test]
    async fn test_initialize_echoes_id() {
        let router = test_router();
        let (tx, _rx) = mpsc::unbounded_channel();

        let response = router
            .dispatch(
                request(RequestId::String("init-1".to_string()), "initialize", json!({})),
                tx,
            )
            .await
            .unwrap();

        assert_eq!(response.id, RequestId::String("init-1".to_string()));
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "test-server");
        assert_eq!(result["capabilities"]["tools"], json!({}));
    }

    #[tokio::test]
    async fn test_list_tools() {
        let router = test_router();
        let (tx, _rx) = mpsc::unbounded_channel();

        let response = router
            .dispatch(request(RequestId::Number(2), "tools/list", json!({})), tx)
            .await
            .unwrap();

        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
    }

    #[tokio::test]
    async fn test_call_tool_success() {
        let router = test_router();
        let (tx, _rx) = mpsc::unbounded_channel();

        let response = router
            .dispatch(
                request(
                    RequestId::Number(3),
                    "tools/call",
                    json!({"name": "ping", "arguments": {}}),
                ),
                tx,
            )
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "pong");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let router = test_router();
        let (tx, _rx) = mpsc::unbounded_channel();

        let response = router
            .dispatch(
                request(
                    RequestId::Number(4),
                    "tools/call",
                    json!({"name": "no_such_tool"}),
                ),
                tx,
            )
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Unknown tool: no_such_tool");
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let router = test_router();
        let (tx, _rx) = mpsc::unbounded_channel();

        let response = router
            .dispatch(
                request(RequestId::Number(5), "resources/list", json!({})),
                tx,
            )
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found: resources/list");
    }

    #[tokio::test]
    async fn test_handler_error_becomes_internal_error() {
        let router = test_router();
        let (tx, _rx) = mpsc::unbounded_channel();

        let response = router
            .dispatch(
                request(
                    RequestId::Number(6),
                    "tools/call",
                    json!({"name": "failing"}),
                ),
                tx,
            )
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::INTERNAL_ERROR);
        assert_eq!(
            error.message,
            "Tool execution error: Internal error: deliberate failure"
        );
    }

    #[tokio::test]
    async fn test_notification_returns_none() {
        let router = test_router();
        let (tx, _rx) = mpsc::unbounded_channel();

        let message = IncomingMessage::Notification(JsonRpcNotification {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: "notifications/initialized".to_string(),
            params: None,
        });

        assert!(router.dispatch(message, tx).await.is_none());
    }
}
