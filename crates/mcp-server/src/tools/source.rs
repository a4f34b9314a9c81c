//! Agent-backed tool source

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::ToolSource;
use crate::protocol::{McpInputSchema, McpTool};
use agent_core::{Agent, AgentAction, AgentError};

/// Tool source derived from an assembled agent.
///
/// Descriptors are converted once at construction and never change; dispatch
/// routes straight into [`Agent::invoke`].
pub struct AgentToolSource {
    agent: Agent,
    tools: Vec<McpTool>,
}

/// Derive the tool-descriptor list and dispatch function from an agent
pub fn get_mcp_tools(agent: Agent) -> AgentToolSource {
    let tools = agent.actions().iter().map(to_mcp_tool).collect();
    AgentToolSource { agent, tools }
}

fn to_mcp_tool(action: &AgentAction) -> McpTool {
    let input_schema = serde_json::from_value::<McpInputSchema>(action.input_schema.clone())
        .unwrap_or_default();

    McpTool {
        name: action.name.clone(),
        description: Some(action.description.clone()),
        input_schema,
    }
}

#[async_trait]
impl ToolSource for AgentToolSource {
    fn descriptors(&self) -> &[McpTool] {
        &self.tools
    }

    async fn dispatch(&self, name: &str, arguments: Option<Value>) -> Result<Value, AgentError> {
        let args = arguments.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        debug!(tool = name, "Dispatching tool call");
        self.agent.invoke(name, &args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{acquire_agent, AgentConfig};
    use serde_json::json;

    async fn test_source() -> AgentToolSource {
        let config = AgentConfig {
            api_key_id: Some("k1".to_string()),
            api_key_secret: Some("s1".to_string()),
            wallet_secret: Some("w1".to_string()),
            ..Default::default()
        };
        get_mcp_tools(acquire_agent(&config).await.unwrap())
    }

    #[tokio::test]
    async fn test_descriptors_derived_once() {
        let source = test_source().await;

        let names: Vec<&str> = source.descriptors().iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"weth_wrap_eth"));
        assert!(names.contains(&"wallet_get_wallet_details"));
        assert_eq!(names.first(), Some(&"weth_wrap_eth"));

        // Repeated reads return the identical list
        let again: Vec<&str> = source.descriptors().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, again);
    }

    #[tokio::test]
    async fn test_descriptor_schema_conversion() {
        let source = test_source().await;
        let transfer = source
            .descriptors()
            .iter()
            .find(|t| t.name == "erc20_transfer")
            .unwrap();

        assert_eq!(transfer.input_schema.schema_type, "object");
        let required = transfer.input_schema.required.as_ref().unwrap();
        assert!(required.contains(&"contract_address".to_string()));
        assert!(required.contains(&"to".to_string()));
        assert!(required.contains(&"amount".to_string()));
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_agent() {
        let source = test_source().await;
        let result = source
            .dispatch("cdp_smart_wallet_get_smart_account", None)
            .await
            .unwrap();
        assert_eq!(result["network"], "base-sepolia");
        assert_eq!(result["sponsored"], false);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let source = test_source().await;
        let err = source.dispatch("no_such_tool", Some(json!({}))).await.unwrap_err();
        assert!(matches!(err, AgentError::UnknownTool(_)));
    }
}
