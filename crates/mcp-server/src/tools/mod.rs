//! Tool derivation and dispatch seam

mod source;

pub use source::{get_mcp_tools, AgentToolSource};

use async_trait::async_trait;
use serde_json::Value;

use crate::protocol::McpTool;
use agent_core::AgentError;

/// Source of tool descriptors and their dispatch function.
///
/// The agent is the production implementation; tests substitute fakes.
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// The full tool-descriptor list, immutable after derivation
    fn descriptors(&self) -> &[McpTool];

    /// Dispatch one tool call to its handler
    async fn dispatch(&self, name: &str, arguments: Option<Value>) -> Result<Value, AgentError>;
}
