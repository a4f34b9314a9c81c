//! Capability providers
//!
//! Each provider is a bundle of named actions exposed to the agent. The set
//! and its order are fixed; tool-name collisions across providers are resolved
//! by provider precedence (earlier wins) when the agent builds its route table.

mod cdp;
mod erc20;
mod pyth;
mod wallet;
mod weth;
mod x402;

pub use cdp::{CdpApiActionProvider, CdpSmartWalletActionProvider};
pub use erc20::Erc20ActionProvider;
pub use pyth::PythActionProvider;
pub use wallet::WalletActionProvider;
pub use weth::WethActionProvider;
pub use x402::X402ActionProvider;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::wallet::CdpWalletProvider;

/// Metadata describing one invocable action: name plus input JSON schema
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// A bundle of named actions backed by the wallet-provider handle
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provider key, used as the tool-name prefix
    fn name(&self) -> &'static str;

    /// Actions this provider exposes, in a stable order
    fn actions(&self) -> Vec<ActionDescriptor>;

    /// Invoke one of this provider's actions
    async fn invoke(
        &self,
        wallet: &CdpWalletProvider,
        action: &str,
        args: &Value,
    ) -> Result<Value>;
}

/// The fixed ordered provider set the agent is assembled from.
///
/// Order matters: it determines provider precedence for tool-name collisions.
pub fn default_action_providers() -> Vec<Box<dyn ActionProvider>> {
    vec![
        Box::new(WethActionProvider),
        Box::new(PythActionProvider),
        Box::new(WalletActionProvider),
        Box::new(Erc20ActionProvider),
        Box::new(CdpApiActionProvider),
        Box::new(CdpSmartWalletActionProvider),
        Box::new(X402ActionProvider),
    ]
}

/// Extract a required string argument from a tool-call argument bag
pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            crate::error::AgentError::Provider(format!("Missing required argument: {key}"))
        })
}
