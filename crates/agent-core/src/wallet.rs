//! CDP smart-wallet provider handle
//!
//! Owns the credential material and the HTTP client used for JSON-RPC and
//! platform API calls. Construction validates configuration only; no network
//! I/O happens until an action needs it.

use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};

/// CDP platform API base URL
const CDP_API_BASE: &str = "https://api.cdp.coinbase.com/platform";

/// Environment-variable names of the three required credentials, in the
/// order operators expect to see them.
pub const REQUIRED_CREDENTIALS: [&str; 3] =
    ["CDP_API_KEY_ID", "CDP_API_KEY_SECRET", "CDP_WALLET_SECRET"];

/// Public RPC endpoints for the networks we know out of the box.
/// Anything else requires an explicit `RPC_URL`.
fn default_rpc_url(network_id: &str) -> Option<&'static str> {
    match network_id {
        "base-sepolia" => Some("https://sepolia.base.org"),
        "base" | "base-mainnet" => Some("https://mainnet.base.org"),
        "ethereum-sepolia" => Some("https://ethereum-sepolia-rpc.publicnode.com"),
        "ethereum" | "ethereum-mainnet" => Some("https://ethereum-rpc.publicnode.com"),
        _ => None,
    }
}

/// Validate a 0x-prefixed 20-byte hex address
fn validate_address(value: &str) -> Result<String> {
    let hex_part = value
        .strip_prefix("0x")
        .ok_or_else(|| AgentError::InvalidAddress(value.to_string()))?;

    let bytes =
        hex::decode(hex_part).map_err(|_| AgentError::InvalidAddress(value.to_string()))?;
    if bytes.len() != 20 {
        return Err(AgentError::InvalidAddress(value.to_string()));
    }

    Ok(value.to_string())
}

fn parse_url(field: &'static str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| AgentError::InvalidUrl {
        field,
        message: e.to_string(),
    })
}

/// Configured wallet-provider handle.
///
/// Built once at startup and shared read-only afterwards; signing happens
/// server-side at the platform, keyed by the wallet secret.
pub struct CdpWalletProvider {
    http: Client,
    api_key_id: String,
    api_key_secret: Zeroizing<String>,
    wallet_secret: Zeroizing<String>,
    network_id: String,
    address: Option<String>,
    owner: Option<String>,
    rpc_url: Url,
    paymaster_url: Option<Url>,
    idempotency_key: Option<String>,
    request_id: AtomicU64,
}

impl std::fmt::Debug for CdpWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpWalletProvider")
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"<redacted>")
            .field("wallet_secret", &"<redacted>")
            .field("network_id", &self.network_id)
            .field("address", &self.address)
            .field("owner", &self.owner)
            .field("rpc_url", &self.rpc_url)
            .field("paymaster_url", &self.paymaster_url)
            .field("idempotency_key", &self.idempotency_key)
            .finish_non_exhaustive()
    }
}

impl CdpWalletProvider {
    /// Configure a wallet provider from process configuration.
    ///
    /// Fails with [`AgentError::MissingCredentials`] naming exactly the
    /// credentials that are absent, so callers can surface an actionable
    /// message without string matching.
    pub async fn configure(config: &AgentConfig) -> Result<Self> {
        let mut missing = Vec::new();
        if config.api_key_id.as_deref().map_or(true, str::is_empty) {
            missing.push(REQUIRED_CREDENTIALS[0]);
        }
        if config.api_key_secret.as_deref().map_or(true, str::is_empty) {
            missing.push(REQUIRED_CREDENTIALS[1]);
        }
        if config.wallet_secret.as_deref().map_or(true, str::is_empty) {
            missing.push(REQUIRED_CREDENTIALS[2]);
        }
        if !missing.is_empty() {
            return Err(AgentError::MissingCredentials(missing));
        }

        let network_id = config.network_id().to_string();

        let address = config.address().map(|a| validate_address(&a)).transpose()?;
        let owner = config
            .owner_address()
            .map(|a| validate_address(&a))
            .transpose()?;

        let rpc_url = match &config.rpc_url {
            Some(url) => parse_url("RPC_URL", url)?,
            None => {
                let url = default_rpc_url(&network_id)
                    .ok_or_else(|| AgentError::UnsupportedNetwork(network_id.clone()))?;
                parse_url("RPC_URL", url)?
            }
        };

        let paymaster_url = config
            .paymaster_url
            .as_deref()
            .map(|url| parse_url("PAYMASTER_URL", url))
            .transpose()?;

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(AgentError::Http)?;

        debug!(network_id = %network_id, rpc_url = %rpc_url, "Configured wallet provider");

        Ok(Self {
            http,
            api_key_id: config.api_key_id.clone().unwrap_or_default(),
            api_key_secret: Zeroizing::new(config.api_key_secret.clone().unwrap_or_default()),
            wallet_secret: Zeroizing::new(config.wallet_secret.clone().unwrap_or_default()),
            network_id,
            address,
            owner,
            rpc_url,
            paymaster_url,
            idempotency_key: config.idempotency_key.clone(),
            request_id: AtomicU64::new(1),
        })
    }

    /// Target network identifier
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Pinned smart-wallet address, if one was configured
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Smart-wallet owner address, if one was configured
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Sponsored-transaction endpoint, if configured
    pub fn paymaster_url(&self) -> Option<&Url> {
        self.paymaster_url.as_ref()
    }

    /// The address required for account-bound calls
    fn require_address(&self) -> Result<&str> {
        self.address.as_deref().ok_or_else(|| {
            AgentError::Provider("No wallet address configured (set ADDRESS)".to_string())
        })
    }

    /// Issue a JSON-RPC call against the chain RPC endpoint
    pub async fn rpc(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(method, id, "RPC request");

        let response: Value = self
            .http
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.get("error") {
            return Err(AgentError::Rpc(format!("{method}: {error}")));
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| AgentError::Rpc(format!("{method}: missing result")))
    }

    /// POST to the CDP platform API with credential and idempotency headers
    pub async fn api_post(&self, path: &str, body: Value) -> Result<Value> {
        let url = format!("{CDP_API_BASE}{path}");

        let mut request = self
            .http
            .post(&url)
            .basic_auth(&self.api_key_id, Some(self.api_key_secret.as_str()))
            .header("X-Wallet-Auth", self.wallet_secret.as_str())
            .json(&body);

        if let Some(key) = &self.idempotency_key {
            request = request.header("X-Idempotency-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        let payload: Value = response.json().await?;

        if !status.is_success() {
            return Err(AgentError::Provider(format!("CDP API {status}: {payload}")));
        }

        Ok(payload)
    }

    /// Native balance of the configured address, as a hex wei quantity
    pub async fn get_balance(&self) -> Result<String> {
        let address = self.require_address()?;
        let result = self
            .rpc("eth_getBalance", json!([address, "latest"]))
            .await?;

        result
            .as_str()
            .map(String::from)
            .ok_or_else(|| AgentError::Rpc("eth_getBalance: non-string result".to_string()))
    }

    /// Submit a transaction from the configured smart wallet.
    ///
    /// Signing and user-operation packaging happen platform-side; the
    /// paymaster URL is forwarded when sponsorship is configured.
    pub async fn send_transaction(&self, to: &str, value: &str, data: &str) -> Result<Value> {
        let address = self.require_address()?;

        let mut body = json!({
            "network": self.network_id,
            "calls": [{ "to": to, "value": value, "data": data }],
        });
        if let Some(paymaster) = &self.paymaster_url {
            body["paymasterUrl"] = json!(paymaster.as_str());
        }

        self.api_post(&format!("/v2/evm/smart-accounts/{address}/send"), body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x036CbD53842c5426634e7929541eC2318f3dCF7e";

    fn valid_config() -> AgentConfig {
        AgentConfig {
            api_key_id: Some("k1".to_string()),
            api_key_secret: Some("s1".to_string()),
            wallet_secret: Some("w1".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_configure_minimal() {
        let provider = CdpWalletProvider::configure(&valid_config()).await.unwrap();

        assert_eq!(provider.network_id(), "base-sepolia");
        assert_eq!(provider.address(), None);
        assert_eq!(provider.owner(), None);
        assert!(provider.paymaster_url().is_none());
    }

    #[tokio::test]
    async fn test_configure_missing_all_credentials() {
        let err = CdpWalletProvider::configure(&AgentConfig::default())
            .await
            .unwrap_err();

        match err {
            AgentError::MissingCredentials(missing) => {
                assert_eq!(
                    missing,
                    vec!["CDP_API_KEY_ID", "CDP_API_KEY_SECRET", "CDP_WALLET_SECRET"]
                );
            }
            other => panic!("expected MissingCredentials, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_configure_missing_one_credential() {
        let config = AgentConfig {
            wallet_secret: None,
            ..valid_config()
        };
        let err = CdpWalletProvider::configure(&config).await.unwrap_err();

        match err {
            AgentError::MissingCredentials(missing) => {
                assert_eq!(missing, vec!["CDP_WALLET_SECRET"]);
            }
            other => panic!("expected MissingCredentials, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_credential_counts_as_missing() {
        let config = AgentConfig {
            api_key_secret: Some("".to_string()),
            ..valid_config()
        };
        let err = CdpWalletProvider::configure(&config).await.unwrap_err();
        assert!(err.to_string().contains("CDP_API_KEY_SECRET"));
    }

    #[tokio::test]
    async fn test_blank_owner_is_not_provided() {
        let config = AgentConfig {
            owner_address: Some("   ".to_string()),
            ..valid_config()
        };
        let provider = CdpWalletProvider::configure(&config).await.unwrap();
        assert_eq!(provider.owner(), None);
    }

    #[tokio::test]
    async fn test_valid_addresses_accepted() {
        let config = AgentConfig {
            address: Some(ADDR.to_string()),
            owner_address: Some(format!("  {ADDR} ")),
            ..valid_config()
        };
        let provider = CdpWalletProvider::configure(&config).await.unwrap();
        assert_eq!(provider.address(), Some(ADDR));
        assert_eq!(provider.owner(), Some(ADDR));
    }

    #[tokio::test]
    async fn test_invalid_address_rejected() {
        for bad in ["nope", "0x1234", "036CbD53842c5426634e7929541eC2318f3dCF7e"] {
            let config = AgentConfig {
                address: Some(bad.to_string()),
                ..valid_config()
            };
            let err = CdpWalletProvider::configure(&config).await.unwrap_err();
            assert!(matches!(err, AgentError::InvalidAddress(_)), "value {bad}");
        }
    }

    #[tokio::test]
    async fn test_unknown_network_requires_rpc_url() {
        let config = AgentConfig {
            network_id: Some("somechain".to_string()),
            ..valid_config()
        };
        let err = CdpWalletProvider::configure(&config).await.unwrap_err();
        assert!(matches!(err, AgentError::UnsupportedNetwork(_)));

        let config = AgentConfig {
            network_id: Some("somechain".to_string()),
            rpc_url: Some("https://rpc.somechain.example".to_string()),
            ..valid_config()
        };
        assert!(CdpWalletProvider::configure(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_paymaster_url_rejected() {
        let config = AgentConfig {
            paymaster_url: Some("not a url".to_string()),
            ..valid_config()
        };
        let err = CdpWalletProvider::configure(&config).await.unwrap_err();
        assert!(matches!(
            err,
            AgentError::InvalidUrl {
                field: "PAYMASTER_URL",
                ..
            }
        ));
    }

    #[test]
    fn test_default_rpc_urls() {
        assert_eq!(default_rpc_url("base-sepolia"), Some("https://sepolia.base.org"));
        assert_eq!(default_rpc_url("base"), Some("https://mainnet.base.org"));
        assert_eq!(default_rpc_url("unknown"), None);
    }
}
