//! WETH actions: wrapping native ETH via the canonical predeploy

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_str, ActionDescriptor, ActionProvider};
use crate::error::{AgentError, Result};
use crate::wallet::CdpWalletProvider;

pub struct WethActionProvider;

/// WETH predeploy shared by OP-stack chains (Base and Base Sepolia)
const WETH_ADDRESS: &str = "0x4200000000000000000000000000000000000006";
/// deposit()
const DEPOSIT_CALLDATA: &str = "0xd0e30db0";

fn weth_address(network_id: &str) -> Result<&'static str> {
    match network_id {
        "base" | "base-mainnet" | "base-sepolia" => Ok(WETH_ADDRESS),
        other => Err(AgentError::Provider(format!(
            "WETH wrapping is not supported on network {other}"
        ))),
    }
}

#[async_trait]
impl ActionProvider for WethActionProvider {
    fn name(&self) -> &'static str {
        "weth"
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        vec![ActionDescriptor {
            name: "wrap_eth",
            description: "Wrap native ETH into WETH",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "amount_wei": {
                        "type": "string",
                        "description": "Amount of ETH to wrap, in wei (decimal string)",
                    },
                },
                "required": ["amount_wei"],
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
            "wrap_eth" => {
                let amount = required_str(args, "amount_wei")?;
                let wei: u128 = amount.parse().map_err(|_| {
                    AgentError::Provider(format!("Invalid wei amount: {amount}"))
                })?;
                let contract = weth_address(wallet.network_id())?;
                wallet
                    .send_transaction(contract, &format!("{wei:#x}"), DEPOSIT_CALLDATA)
                    .await
            }
            other => Err(AgentError::UnknownTool(format!("weth_{other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weth_address_per_network() {
        assert_eq!(weth_address("base-sepolia").unwrap(), WETH_ADDRESS);
        assert_eq!(weth_address("base").unwrap(), WETH_ADDRESS);
        assert!(weth_address("ethereum").is_err());
    }
}
