//! Pyth price-oracle actions backed by the Hermes HTTP API

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use super::{required_str, ActionDescriptor, ActionProvider};
use crate::error::{AgentError, Result};
use crate::wallet::CdpWalletProvider;

pub struct PythActionProvider;

const HERMES_BASE: &str = "https://hermes.pyth.network";

/// Hermes feed lookup URL; the symbol is percent-encoded into the query
fn feed_lookup_url(symbol: &str) -> Result<Url> {
    Url::parse_with_params(
        &format!("{HERMES_BASE}/v2/price_feeds"),
        [("query", symbol), ("asset_type", "crypto")],
    )
    .map_err(|e| AgentError::Provider(format!("Invalid feed lookup URL: {e}")))
}

/// Hermes latest-price URL; the feed id is percent-encoded into the query
fn latest_price_url(feed_id: &str) -> Result<Url> {
    Url::parse_with_params(
        &format!("{HERMES_BASE}/v2/updates/price/latest"),
        [("ids[]", feed_id)],
    )
    .map_err(|e| AgentError::Provider(format!("Invalid price update URL: {e}")))
}

#[async_trait]
impl ActionProvider for PythActionProvider {
    fn name(&self) -> &'static str {
        "pyth"
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        vec![
            ActionDescriptor {
                name: "fetch_price_feed_id",
                description: "Look up the Pyth price-feed id for a token symbol",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "symbol": {"type": "string", "description": "Token symbol, e.g. BTC"},
                    },
                    "required": ["symbol"],
                }),
            },
            ActionDescriptor {
                name: "fetch_price",
                description: "Fetch the latest price for a Pyth price-feed id",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "price_feed_id": {"type": "string", "description": "Pyth price-feed id"},
                    },
                    "required": ["price_feed_id"],
                }),
            },
        ]
    }

    async fn invoke(
        &self,
        _wallet: &CdpWalletProvider,
        action: &str,
        args: &Value,
    ) -> Result<Value> {
        match action {
            "fetch_price_feed_id" => {
                let symbol = required_str(args, "symbol")?;
                let url = feed_lookup_url(symbol)?;
                let feeds: Value = reqwest::get(url).await?.json().await?;

                let first = feeds
                    .as_array()
                    .and_then(|a| a.first())
                    .ok_or_else(|| {
                        AgentError::Provider(format!("No price feed found for {symbol}"))
                    })?;
                Ok(json!({
                    "symbol": symbol,
                    "price_feed_id": first.get("id").cloned().unwrap_or(Value::Null),
                }))
            }
            "fetch_price" => {
                let feed_id = required_str(args, "price_feed_id")?;
                let url = latest_price_url(feed_id)?;
                let update: Value = reqwest::get(url).await?.json().await?;

                let parsed = update
                    .get("parsed")
                    .and_then(|p| p.as_array())
                    .and_then(|a| a.first())
                    .ok_or_else(|| {
                        AgentError::Provider(format!("No price update for feed {feed_id}"))
                    })?;
                Ok(parsed.clone())
            }
            other => Err(AgentError::UnknownTool(format!("pyth_{other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_lookup_url() {
        let url = feed_lookup_url("ETH").unwrap();
        assert_eq!(
            url.as_str(),
            "https://hermes.pyth.network/v2/price_feeds?query=ETH&asset_type=crypto"
        );
    }

    #[test]
    fn test_urls_encode_user_input() {
        // Reserved characters must not alter the request shape
        let url = feed_lookup_url("A&B #C").unwrap();
        assert_eq!(url.query(), Some("query=A%26B+%23C&asset_type=crypto"));

        let url = latest_price_url("0xabc&ids[]=0xdef").unwrap();
        assert_eq!(url.query(), Some("ids%5B%5D=0xabc%26ids%5B%5D%3D0xdef"));
        assert!(url.as_str().starts_with("https://hermes.pyth.network/v2/updates/price/latest?"));
    }
}
