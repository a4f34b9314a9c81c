//! AgentKit MCP server - stdio MCP server for wallet capability tools
//!
//! Configuration comes from environment variables (or the matching flags);
//! the three CDP credentials are required, everything else is optional.
//! Diagnostics go to stderr so the protocol stream on stdout stays clean.

use clap::Parser;
use std::sync::Arc;
use tracing::info;

use agent_core::{acquire_agent, AgentConfig};
use mcp_server::{get_mcp_tools, McpServer, ToolSource};

/// AgentKit MCP server - onchain wallet tools over the Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "agentkit-mcp")]
#[command(version)]
#[command(about = "AgentKit MCP server - onchain wallet tools via MCP")]
struct Args {
    /// CDP API key id
    #[arg(long, env = "CDP_API_KEY_ID", hide_env_values = true)]
    api_key_id: Option<String>,

    /// CDP API key secret
    #[arg(long, env = "CDP_API_KEY_SECRET", hide_env_values = true)]
    api_key_secret: Option<String>,

    /// CDP wallet secret
    #[arg(long, env = "CDP_WALLET_SECRET", hide_env_values = true)]
    wallet_secret: Option<String>,

    /// Network identifier (default: base-sepolia)
    #[arg(long, env = "NETWORK_ID")]
    network_id: Option<String>,

    /// Smart-wallet address to pin
    #[arg(long, env = "ADDRESS")]
    address: Option<String>,

    /// Smart-wallet owner address
    #[arg(long, env = "OWNER_ADDRESS")]
    owner_address: Option<String>,

    /// Paymaster URL for sponsored transactions
    #[arg(long, env = "PAYMASTER_URL")]
    paymaster_url: Option<String>,

    /// Custom chain RPC endpoint
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,

    /// Idempotency key for wallet creation
    #[arg(long, env = "IDEMPOTENCY_KEY", hide_env_values = true)]
    idempotency_key: Option<String>,
}

impl From<Args> for AgentConfig {
    fn from(args: Args) -> Self {
        AgentConfig {
            api_key_id: args.api_key_id,
            api_key_secret: args.api_key_secret,
            wallet_secret: args.wallet_secret,
            network_id: args.network_id,
            address: args.address,
            owner_address: args.owner_address,
            paymaster_url: args.paymaster_url,
            rpc_url: args.rpc_url,
            idempotency_key: args.idempotency_key,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // One structured line on the side channel, then a non-zero exit.
        // No stack field: backtraces are unavailable here.
        let payload = serde_json::json!({
            "error": "Failed to start MCP server",
            "message": e.to_string(),
        });
        eprintln!("{payload}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Diagnostics must never touch stdout: that stream belongs to the protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting MCP server");

    let config = AgentConfig::from(args);

    info!("Initializing agent");
    let agent = acquire_agent(&config).await?;
    info!("Agent initialized successfully");

    info!("Loading MCP tools");
    let source = get_mcp_tools(agent);
    info!("Loaded {} tools", source.descriptors().len());

    let server = McpServer::new(Arc::new(source));

    info!("Connecting to stdio transport");
    server.run().await?;

    Ok(())
}
