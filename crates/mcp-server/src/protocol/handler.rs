//! MCP request handler

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::capabilities::ServerCapabilities;
use super::types::*;
use crate::tools::ToolSource;

/// Handler for MCP requests, routing over a tool source
pub struct RequestHandler {
    source: Arc<dyn ToolSource>,
    server_name: String,
    server_version: String,
}

impl RequestHandler {
    /// Create a new request handler
    pub fn new(source: Arc<dyn ToolSource>) -> Self {
        Self {
            source,
            server_name: crate::server::SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Handle an incoming message
    pub async fn handle(&self, message: McpMessage) -> Option<McpMessage> {
        if message.is_request() {
            let method = message.method.as_ref()?;
            let id = message.id.clone()?;

            debug!("Handling request: {}", method);

            let result = match method.as_str() {
                "initialize" => self.handle_initialize(message.params),
                "ping" => Ok(serde_json::json!({})),
                "tools/list" => self.handle_tools_list(),
                "tools/call" => self.handle_tools_call(message.params).await,
                _ => Err(McpError::method_not_found()),
            };

            Some(match result {
                Ok(result) => McpMessage::response(id, result),
                Err(error) => McpMessage::error_response(Some(id), error),
            })
        } else if message.is_notification() {
            let method = message.method.as_deref().unwrap_or_default();

            match method {
                "notifications/initialized" | "initialized" => {
                    info!("Client initialized");
                }
                "notifications/cancelled" => {
                    debug!("Request cancelled");
                }
                other => {
                    debug!("Unknown notification: {}", other);
                }
            }

            None
        } else {
            debug!("Received unexpected response");
            None
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::invalid_params(e.to_string()))?
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        info!(
            "Initializing session with client: {} v{}",
            params.client_info.name, params.client_info.version
        );

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::with_tools(),
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
        };

        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    /// Handle tools/list: the full descriptor list, unconditionally
    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let result = ToolsListResult {
            tools: self.source.descriptors().to_vec(),
        };
        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    /// Handle tools/call: dispatch and relay the result; failures become a
    /// protocol error identifying the failing tool
    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::invalid_params(e.to_string()))?
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        debug!("Calling tool: {}", params.name);

        match self.source.dispatch(&params.name, params.arguments).await {
            Ok(value) => {
                let text = serde_json::to_string_pretty(&value)
                    .map_err(|e| McpError::internal_error(e.to_string()))?;
                serde_json::to_value(ToolCallResult::text(text))
                    .map_err(|e| McpError::internal_error(e.to_string()))
            }
            Err(e) => {
                error!("Tool execution failed: {}", e);
                Err(McpError::internal_error(format!(
                    "Tool {} failed: {}",
                    params.name, e
                )))
            }
        }
    }
}
