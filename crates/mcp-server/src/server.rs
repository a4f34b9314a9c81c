//! Main MCP server orchestration

use std::sync::Arc;
use tracing::info;

use crate::tools::ToolSource;
use crate::transport::StdioTransport;

/// Fixed server name advertised during initialization
pub const SERVER_NAME: &str = "agentkit";

/// MCP server over a stdio transport
pub struct McpServer {
    source: Arc<dyn ToolSource>,
}

impl McpServer {
    /// Create a new MCP server over a tool source
    pub fn new(source: Arc<dyn ToolSource>) -> Self {
        Self { source }
    }

    /// Run the server until the transport closes
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Starting MCP server in stdio mode");
        let transport = StdioTransport::new(self.source.clone());
        transport.run().await
    }
}
