//! # agent-core
//!
//! Wallet-provider bootstrap and capability providers for the AgentKit MCP
//! server:
//! - Explicit process configuration with address normalization and a
//!   secrets-free presence snapshot
//! - CDP smart-wallet provider handle (JSON-RPC + platform API client)
//! - Seven fixed capability providers exposed as named actions
//! - Agent assembly with provider-precedence tool routing

pub mod agent;
pub mod config;
pub mod error;
pub mod providers;
mod wallet;

pub use agent::{acquire_agent, Agent, AgentAction};
pub use config::{AgentConfig, DEFAULT_NETWORK_ID};
pub use error::{AgentError, Result};
pub use providers::{default_action_providers, ActionDescriptor, ActionProvider};
pub use wallet::{CdpWalletProvider, REQUIRED_CREDENTIALS};
