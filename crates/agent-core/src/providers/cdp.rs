//! CDP platform actions: faucet requests and smart-account details

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ActionDescriptor, ActionProvider};
use crate::error::{AgentError, Result};
use crate::wallet::CdpWalletProvider;

/// CDP API actions (platform-side features like the testnet faucet)
pub struct CdpApiActionProvider;

/// Smart-wallet-specific actions bound to the configured smart account
pub struct CdpSmartWalletActionProvider;

#[async_trait]
impl ActionProvider for CdpApiActionProvider {
    fn name(&self) -> &'static str {
        "cdp_api"
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        vec![ActionDescriptor {
            name: "request_faucet_funds",
            description: "Request testnet funds from the CDP faucet",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "asset": {
                        "type": "string",
                        "description": "Asset to request, defaults to eth",
                    },
                },
            }),
        }]
    }

    async fn invoke(
        &self,
        wallet: &CdpWalletProvider,
        action: &str,
        args: &Value,
    ) -> Result<Value> {
        match action {
            "request_faucet_funds" => {
                let address = wallet.address().ok_or_else(|| {
                    AgentError::Provider("No wallet address configured (set ADDRESS)".to_string())
                })?;
                let asset = args.get("asset").and_then(Value::as_str).unwrap_or("eth");
                wallet
                    .api_post(
                        "/v2/evm/faucet",
                        json!({
                            "address": address,
                            "network": wallet.network_id(),
                            "token": asset,
                        }),
                    )
                    .await
            }
            other => Err(AgentError::UnknownTool(format!("cdp_api_{other}"))),
        }
    }
}

#[async_trait]
impl ActionProvider for CdpSmartWalletActionProvider {
    fn name(&self) -> &'static str {
        "cdp_smart_wallet"
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        vec![ActionDescriptor {
            name: "get_smart_account",
            description: "Get the configured smart account: address, owner and sponsorship status",
            input_schema: json!({"type": "object", "properties": {}}),
        }]
    }

    async fn invoke(
        &self,
        wallet: &CdpWalletProvider,
        action: &str,
        _args: &Value,
    ) -> Result<Value> {
        match action {
            "get_smart_account" => Ok(json!({
                "address": wallet.address(),
                "owner": wallet.owner(),
                "network": wallet.network_id(),
                "sponsored": wallet.paymaster_url().is_some(),
            })),
            other => Err(AgentError::UnknownTool(format!("cdp_smart_wallet_{other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;

    #[tokio::test]
    async fn test_get_smart_account_reports_sponsorship() {
        let config = AgentConfig {
            api_key_id: Some("k1".to_string()),
            api_key_secret: Some("s1".to_string()),
            wallet_secret: Some("w1".to_string()),
            paymaster_url: Some("https://paymaster.example".to_string()),
            ..Default::default()
        };
        let wallet = CdpWalletProvider::configure(&config).await.unwrap();

        let result = CdpSmartWalletActionProvider
            .invoke(&wallet, "get_smart_account", &json!({}))
            .await
            .unwrap();

        assert_eq!(result["sponsored"], true);
        assert_eq!(result["address"], Value::Null);
    }

    #[tokio::test]
    async fn test_faucet_requires_address() {
        let config = AgentConfig {
            api_key_id: Some("k1".to_string()),
            api_key_secret: Some("s1".to_string()),
            wallet_secret: Some("w1".to_string()),
            ..Default::default()
        };
        let wallet = CdpWalletProvider::configure(&config).await.unwrap();

        let err = CdpApiActionProvider
            .invoke(&wallet, "request_faucet_funds", &json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ADDRESS"));
    }
}
