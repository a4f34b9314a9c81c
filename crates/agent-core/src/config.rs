//! Process configuration for the agent bootstrapper
//!
//! All settings are read once at startup and never mutated. The struct is
//! built explicitly by the caller (the binary maps environment variables onto
//! it), so tests never have to touch the process environment.

use indexmap::IndexMap;
use std::fmt;

/// Default network when `NETWORK_ID` is unset
pub const DEFAULT_NETWORK_ID: &str = "base-sepolia";

/// Flat configuration for wallet-provider construction and agent assembly.
///
/// The three credential fields are required by wallet-provider construction,
/// which validates them; everything else is optional. Address-shaped values
/// are normalized through [`AgentConfig::address`] / [`AgentConfig::owner_address`]
/// so that a blank string is never passed downstream as a literal address.
#[derive(Clone, Default)]
pub struct AgentConfig {
    pub api_key_id: Option<String>,
    pub api_key_secret: Option<String>,
    pub wallet_secret: Option<String>,
    pub network_id: Option<String>,
    pub address: Option<String>,
    pub owner_address: Option<String>,
    pub paymaster_url: Option<String>,
    pub rpc_url: Option<String>,
    pub idempotency_key: Option<String>,
}

/// Trim an optional address-shaped value; absent or empty-after-trim means
/// "not provided", never an empty string.
fn normalize_address(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

impl AgentConfig {
    /// Effective network identifier, defaulting to `base-sepolia`
    pub fn network_id(&self) -> &str {
        self.network_id
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_NETWORK_ID)
    }

    /// Normalized wallet address, `None` when absent or blank
    pub fn address(&self) -> Option<String> {
        normalize_address(self.address.as_deref())
    }

    /// Normalized smart-wallet owner address, `None` when absent or blank
    pub fn owner_address(&self) -> Option<String> {
        normalize_address(self.owner_address.as_deref())
    }

    /// Secrets-free snapshot of which settings are present.
    ///
    /// Pure function: the side-effecting log write lives with the caller.
    /// Booleans only; secret values never appear here.
    pub fn presence_snapshot(&self) -> IndexMap<&'static str, bool> {
        let mut snapshot = IndexMap::new();
        snapshot.insert("api_key_id", self.api_key_id.is_some());
        snapshot.insert("api_key_secret", self.api_key_secret.is_some());
        snapshot.insert("wallet_secret", self.wallet_secret.is_some());
        snapshot.insert("network_id", self.network_id.is_some());
        snapshot.insert("address", self.address().is_some());
        snapshot.insert("owner_address", self.owner_address().is_some());
        snapshot.insert("paymaster_url", self.paymaster_url.is_some());
        snapshot.insert("rpc_url", self.rpc_url.is_some());
        snapshot.insert("idempotency_key", self.idempotency_key.is_some());
        snapshot
    }
}

// Manual Debug: credential values must never reach a log line.
impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("AgentConfig");
        for (field, present) in self.presence_snapshot() {
            s.field(field, &present);
        }
        s.field("effective_network_id", &self.network_id());
        s.finish()
    }
}
