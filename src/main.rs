//! Estate portal entry point.
//!
//! Startup order: CLI args → configuration → tracing → chain client →
//! contract gateway → HTTP server. Everything shared is constructed here
//! and injected; no module owns global state.

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alloy::primitives::Address;
use estate_portal::chain::{AgencyContract, ChainClient};
use estate_portal::config::{load_config, PortalConfig};
use estate_portal::http::{AppState, HttpServer};

#[derive(Debug, Parser)]
#[command(name = "estate-portal", about = "Web front-end for the estate marketplace contract")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "portal.toml")]
    config: PathBuf,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = if args.config.exists() {
        load_config(&args.config)?
    } else {
        PortalConfig::default()
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "estate_portal={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("estate-portal v{} starting", env!("CARGO_PKG_VERSION"));

    if !args.config.exists() {
        tracing::warn!(
            path = %args.config.display(),
            "Config file not found, running on defaults"
        );
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.chain.rpc_url,
        request_timeout_secs = config.http.request_timeout_secs,
        "Configuration loaded"
    );

    // Connect to the node
    let chain = ChainClient::new(config.chain.clone()).await?;

    // Bind the contract gateway
    let contract_address = if config.contract.address.is_empty() {
        tracing::warn!("No contract address configured; contract calls will fail");
        Address::ZERO
    } else {
        Address::from_str(&config.contract.address)?
    };
    let contract = Arc::new(AgencyContract::new(chain.clone(), contract_address));

    let state = AppState::new(chain.clone(), contract, Arc::new(chain.clone()));

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config, state);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
