//! stdio transport for MCP (used by MCP clients such as Claude Desktop)

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::protocol::{McpError, McpMessage, RequestHandler};
use crate::tools::ToolSource;

/// stdio transport for the MCP protocol
pub struct StdioTransport {
    handler: RequestHandler,
}

impl StdioTransport {
    /// Create a new stdio transport over a tool source
    pub fn new(source: Arc<dyn ToolSource>) -> Self {
        Self {
            handler: RequestHandler::new(source),
        }
    }

    /// Run the stdio transport until the input stream closes
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        info!("MCP server connected and ready");

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        loop {
            line.clear();

            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                // EOF
                info!("EOF received, shutting down");
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("Received: {}", line);

            let message: McpMessage = match serde_json::from_str(line) {
                Ok(msg) => msg,
                Err(e) => {
                    error!("Failed to parse message: {}", e);
                    let error_response = McpMessage::error_response(None, McpError::parse_error());
                    let response_line = serde_json::to_string(&error_response)?;
                    stdout.write_all(response_line.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                    continue;
                }
            };

            if let Some(response) = self.handler.handle(message).await {
                let response_line = serde_json::to_string(&response)?;
                debug!("Sending: {}", response_line);
                stdout.write_all(response_line.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }
}
