//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid URL for {field}: {message}")]
    InvalidUrl { field: &'static str, message: String },

    #[error("Unsupported network: {0} (set RPC_URL to use a custom network)")]
    UnsupportedNetwork(String),

    #[error("Failed to initialize agent: {0}")]
    Initialization(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
