//! Agent assembly and bootstrap
//!
//! The agent is the composition of one wallet-provider handle and the fixed
//! ordered set of capability providers. It is built once at startup, is
//! read-only afterwards, and is the sole owner of the wallet provider.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::providers::{default_action_providers, ActionProvider};
use crate::wallet::CdpWalletProvider;

/// A fully qualified agent action: `{provider}_{action}` plus its schema
#[derive(Debug, Clone)]
pub struct AgentAction {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Composition of a wallet provider and capability providers
pub struct Agent {
    wallet: CdpWalletProvider,
    providers: Vec<Box<dyn ActionProvider>>,
    /// Tool name -> (provider index, action name)
    routes: IndexMap<String, (usize, &'static str)>,
    actions: Vec<AgentAction>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("providers", &self.provider_names())
            .field("actions", &self.actions.len())
            .finish_non_exhaustive()
    }
}

impl Agent {
    /// Assemble an agent from a wallet provider and an ordered provider list.
    ///
    /// Tool names are `{provider}_{action}`; on a collision the earlier
    /// provider wins (provider precedence).
    pub async fn from(
        wallet: CdpWalletProvider,
        providers: Vec<Box<dyn ActionProvider>>,
    ) -> Result<Self> {
        let mut routes = IndexMap::new();
        let mut actions = Vec::new();

        for (index, provider) in providers.iter().enumerate() {
            for action in provider.actions() {
                let tool_name = format!("{}_{}", provider.name(), action.name);
                if routes.contains_key(&tool_name) {
                    debug!(tool = %tool_name, "Duplicate tool name, keeping earlier provider");
                    continue;
                }
                routes.insert(tool_name.clone(), (index, action.name));
                actions.push(AgentAction {
                    name: tool_name,
                    description: action.description.to_string(),
                    input_schema: action.input_schema,
                });
            }
        }

        debug!(
            providers = providers.len(),
            actions = actions.len(),
            "Assembled agent"
        );

        Ok(Self {
            wallet,
            providers,
            routes,
            actions,
        })
    }

    /// The wallet-provider handle this agent wraps
    pub fn wallet(&self) -> &CdpWalletProvider {
        &self.wallet
    }

    /// Provider keys, in precedence order
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// All invocable actions, in provider order
    pub fn actions(&self) -> &[AgentAction] {
        &self.actions
    }

    /// Dispatch a tool call to the owning provider
    pub async fn invoke(&self, name: &str, args: &Value) -> Result<Value> {
        let (index, action) = self
            .routes
            .get(name)
            .copied()
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))?;

        self.providers[index]
            .invoke(&self.wallet, action, args)
            .await
    }
}

/// Bootstrap the agent from process configuration.
///
/// Any construction failure is logged to the side channel and re-raised as
/// [`AgentError::Initialization`]; missing credentials get an actionable
/// message naming the three required variables. No retries: initialization
/// failure is fatal to the process.
pub async fn acquire_agent(config: &AgentConfig) -> Result<Agent> {
    info!(config = ?config.presence_snapshot(), "Environment check");

    match build_agent(config).await {
        Ok(agent) => Ok(agent),
        Err(e) => {
            error!("Error initializing agent: {e}");
            match e {
                AgentError::MissingCredentials(_) => Err(AgentError::Initialization(format!(
                    "{e}. Please ensure all required environment variables \
                     (CDP_API_KEY_ID, CDP_API_KEY_SECRET, CDP_WALLET_SECRET) are set."
                ))),
                other => Err(AgentError::Initialization(other.to_string())),
            }
        }
    }
}

async fn build_agent(config: &AgentConfig) -> Result<Agent> {
    let wallet = CdpWalletProvider::configure(config).await?;
    Agent::from(wallet, default_action_providers()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ActionDescriptor;
    use async_trait::async_trait;
    use serde_json::json;

    fn valid_config() -> AgentConfig {
        AgentConfig {
            api_key_id: Some("k1".to_string()),
            api_key_secret: Some("s1".to_string()),
            wallet_secret: Some("w1".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_acquire_agent_minimal_config() {
        let agent = acquire_agent(&valid_config()).await.unwrap();

        assert_eq!(
            agent.provider_names(),
            vec!["weth", "pyth", "wallet", "erc20", "cdp_api", "cdp_smart_wallet", "x402"]
        );
        assert_eq!(agent.wallet().network_id(), "base-sepolia");
        assert_eq!(agent.wallet().address(), None);
        assert_eq!(agent.wallet().owner(), None);
    }

    #[tokio::test]
    async fn test_acquire_agent_missing_credentials() {
        let err = acquire_agent(&AgentConfig::default()).await.unwrap_err();
        assert!(matches!(err, AgentError::Initialization(_)));

        let message = err.to_string();
        assert!(message.contains("Failed to initialize agent"));
        assert!(message.contains("CDP_API_KEY_ID, CDP_API_KEY_SECRET, CDP_WALLET_SECRET"));
    }

    #[tokio::test]
    async fn test_acquire_agent_other_failure_wraps_generically() {
        let config = AgentConfig {
            address: Some("0xnot-an-address".to_string()),
            ..valid_config()
        };
        let err = acquire_agent(&config).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Failed to initialize agent"));
        assert!(!message.contains("CDP_API_KEY_ID"));
    }

    #[tokio::test]
    async fn test_actions_are_fully_qualified() {
        let agent = acquire_agent(&valid_config()).await.unwrap();
        let names: Vec<&str> = agent.actions().iter().map(|a| a.name.as_str()).collect();

        assert!(names.contains(&"weth_wrap_eth"));
        assert!(names.contains(&"pyth_fetch_price"));
        assert!(names.contains(&"wallet_get_balance"));
        assert!(names.contains(&"erc20_transfer"));
        assert!(names.contains(&"cdp_api_request_faucet_funds"));
        assert!(names.contains(&"cdp_smart_wallet_get_smart_account"));
        assert!(names.contains(&"x402_paid_request"));
        // weth comes first in precedence order
        assert_eq!(names[0], "weth_wrap_eth");
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let agent = acquire_agent(&valid_config()).await.unwrap();
        let err = agent.invoke("nonsense_tool", &json!({})).await.unwrap_err();
        assert!(matches!(err, AgentError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_invoke_local_tool() {
        let agent = acquire_agent(&valid_config()).await.unwrap();
        let result = agent
            .invoke("wallet_get_wallet_details", &json!({}))
            .await
            .unwrap();
        assert_eq!(result["network"], "base-sepolia");
    }

    struct FixedProvider {
        name: &'static str,
        reply: &'static str,
    }

    #[async_trait]
    impl ActionProvider for FixedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn actions(&self) -> Vec<ActionDescriptor> {
            vec![ActionDescriptor {
                name: "echo",
                description: "test action",
                input_schema: json!({"type": "object"}),
            }]
        }

        async fn invoke(
            &self,
            _wallet: &CdpWalletProvider,
            _action: &str,
            _args: &Value,
        ) -> Result<Value> {
            Ok(json!(self.reply))
        }
    }

    #[tokio::test]
    async fn test_collision_keeps_earlier_provider() {
        let wallet = CdpWalletProvider::configure(&valid_config()).await.unwrap();
        let providers: Vec<Box<dyn ActionProvider>> = vec![
            Box::new(FixedProvider { name: "dup", reply: "first" }),
            Box::new(FixedProvider { name: "dup", reply: "second" }),
        ];
        let agent = Agent::from(wallet, providers).await.unwrap();

        assert_eq!(agent.actions().len(), 1);
        let result = agent.invoke("dup_echo", &json!({})).await.unwrap();
        assert_eq!(result, json!("first"));
    }
}
