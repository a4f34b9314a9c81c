//! x402 payment-protocol actions
//!
//! Makes HTTP requests to x402-enabled endpoints and surfaces the payment
//! terms when the server answers 402 Payment Required.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_str, ActionDescriptor, ActionProvider};
use crate::error::{AgentError, Result};
use crate::wallet::CdpWalletProvider;

pub struct X402ActionProvider;

#[async_trait]
impl ActionProvider for X402ActionProvider {
    fn name(&self) -> &'static str {
        "x402"
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        vec![ActionDescriptor {
            name: "paid_request",
            description: "Make an HTTP request to an x402-protected endpoint, \
                          returning payment terms when payment is required",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {"type": "string", "description": "Endpoint URL"},
                },
                "required": ["url"],
            }),
        }]
    }

    async fn invoke(
        &self,
        _wallet: &CdpWalletProvider,
        action: &str,
        args: &Value,
    ) -> Result<Value> {
        match action {
            "paid_request" => {
                let url = required_str(args, "url")?;
                let response = reqwest::get(url).await?;
                let status = response.status();
                let body: Value = response.json().await.unwrap_or(Value::Null);

                if status.as_u16() == 402 {
                    return Ok(json!({
                        "status": "payment_required",
                        "accepts": body.get("accepts").cloned().unwrap_or(Value::Null),
                        "x402_version": body.get("x402Version").cloned().unwrap_or(Value::Null),
                    }));
                }
                if !status.is_success() {
                    return Err(AgentError::Provider(format!("HTTP {status}: {body}")));
                }

                Ok(json!({"status": "ok", "body": body}))
            }
            other => Err(AgentError::UnknownTool(format!("x402_{other}"))),
        }
    }
}
