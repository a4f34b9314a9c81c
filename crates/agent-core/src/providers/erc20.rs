//! ERC-20 actions: balance lookup and transfer via ABI-encoded calls

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_str, ActionDescriptor, ActionProvider};
use crate::error::{AgentError, Result};
use crate::wallet::CdpWalletProvider;

pub struct Erc20ActionProvider;

/// balanceOf(address)
const SELECTOR_BALANCE_OF: &str = "70a08231";
/// transfer(address,uint256)
const SELECTOR_TRANSFER: &str = "a9059cbb";

/// Left-pad a 0x-prefixed address to a 32-byte ABI word
fn encode_address(address: &str) -> Result<String> {
    let hex_part = address
        .strip_prefix("0x")
        .ok_or_else(|| AgentError::InvalidAddress(address.to_string()))?;
    if hex::decode(hex_part).map(|b| b.len() != 20).unwrap_or(true) {
        return Err(AgentError::InvalidAddress(address.to_string()));
    }
    Ok(format!("{:0>64}", hex_part.to_lowercase()))
}

/// Encode a decimal token amount as a 32-byte ABI word
fn encode_amount(amount: &str) -> Result<String> {
    let value: u128 = amount
        .parse()
        .map_err(|_| AgentError::Provider(format!("Invalid token amount: {amount}")))?;
    Ok(format!("{value:064x}"))
}

fn encode_balance_of(holder: &str) -> Result<String> {
    Ok(format!("0x{SELECTOR_BALANCE_OF}{}", encode_address(holder)?))
}

fn encode_transfer(to: &str, amount: &str) -> Result<String> {
    Ok(format!(
        "0x{SELECTOR_TRANSFER}{}{}",
        encode_address(to)?,
        encode_amount(amount)?
    ))
}

#[async_trait]
impl ActionProvider for Erc20ActionProvider {
    fn name(&self) -> &'static str {
        "erc20"
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        vec![
            ActionDescriptor {
                name: "get_balance",
                description: "Get the ERC-20 token balance of the wallet",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "contract_address": {
                            "type": "string",
                            "description": "ERC-20 contract address (0x-prefixed)",
                        },
                    },
                    "required": ["contract_address"],
                }),
            },
            ActionDescriptor {
                name: "transfer",
                description: "Transfer ERC-20 tokens to another address",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "contract_address": {
                            "type": "string",
                            "description": "ERC-20 contract address (0x-prefixed)",
                        },
                        "to": {"type": "string", "description": "Recipient address (0x-prefixed)"},
                        "amount": {
                            "type": "string",
                            "description": "Amount in the token's base units (decimal string)",
                        },
                    },
                    "required": ["contract_address", "to", "amount"],
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
            "get_balance" => {
                let contract = required_str(args, "contract_address")?;
                let holder = wallet.address().ok_or_else(|| {
                    AgentError::Provider("No wallet address configured (set ADDRESS)".to_string())
                })?;
                let data = encode_balance_of(holder)?;
                let result = wallet
                    .rpc(
                        "eth_call",
                        json!([{ "to": contract, "data": data }, "latest"]),
                    )
                    .await?;
                Ok(json!({
                    "contract": contract,
                    "holder": holder,
                    "balance": result,
                }))
            }
            "transfer" => {
                let contract = required_str(args, "contract_address")?;
                let to = required_str(args, "to")?;
                let amount = required_str(args, "amount")?;
                let data = encode_transfer(to, amount)?;
                wallet.send_transaction(contract, "0x0", &data).await
            }
            other => Err(AgentError::UnknownTool(format!("erc20_{other}"))),
        }
    }
}
