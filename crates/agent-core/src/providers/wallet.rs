//! Generic wallet actions: details, balance, native transfer

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_str, ActionDescriptor, ActionProvider};
use crate::error::{AgentError, Result};
use crate::wallet::CdpWalletProvider;

pub struct WalletActionProvider;

/// Parse a decimal wei amount into the hex quantity RPC endpoints expect
fn to_hex_wei(value: &str) -> Result<String> {
    let wei: u128 = value
        .parse()
        .map_err(|_| AgentError::Provider(format!("Invalid wei amount: {value}")))?;
    Ok(format!("{wei:#x}"))
}

#[async_trait]
impl ActionProvider for WalletActionProvider {
    fn name(&self) -> &'static str {
        "wallet"
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        vec![
            ActionDescriptor {
                name: "get_wallet_details",
                description: "Get details about the configured wallet: address, owner and network",
                input_schema: json!({"type": "object", "properties": {}}),
            },
            ActionDescriptor {
                name: "get_balance",
                description: "Get the native token balance of the wallet in wei",
                input_schema: json!({"type": "object", "properties": {}}),
            },
            ActionDescriptor {
                name: "native_transfer",
                description: "Transfer native tokens to another address",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "to": {"type": "string", "description": "Recipient address (0x-prefixed)"},
                        "value": {"type": "string", "description": "Amount in wei (decimal string)"},
                    },
                    "required": ["to", "value"],
                }),
            },
        ]
    }

    async fn invoke(
        &self,
        wallet: &CdpWalletProvider,
        action: &str,
        args: &Value,
    ) -> Result<Value> {
        match action {
            "get_wallet_details" => Ok(json!({
                "address": wallet.address(),
                "owner": wallet.owner(),
                "network": wallet.network_id(),
                "provider": "cdp_smart_wallet",
            })),
            "get_balance" => {
                let balance = wallet.get_balance().await?;
                Ok(json!({
                    "address": wallet.address(),
                    "balance_wei": balance,
                }))
            }
            "native_transfer" => {
                let to = required_str(args, "to")?;
                let value = to_hex_wei(required_str(args, "value")?)?;
                wallet.send_transaction(to, &value, "0x").await
            }
            other => Err(AgentError::UnknownTool(format!("wallet_{other}"))),
        }
    }
}
