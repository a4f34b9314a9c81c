//! # mcp-server
//!
//! MCP (Model Context Protocol) server for AgentKit wallet tools,
//! served over a stdio transport.

pub mod protocol;
mod server;
pub mod tools;
pub mod transport;

pub use protocol::{McpError, McpMessage, RequestHandler, ServerCapabilities};
pub use server::{McpServer, SERVER_NAME};
pub use tools::{get_mcp_tools, AgentToolSource, ToolSource};
pub use transport::StdioTransport;
