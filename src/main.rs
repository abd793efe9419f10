//! Land Registry Gateway
//!
//! An HTTP gateway over the land registry smart contract, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 LAND GATEWAY                   │
//!                    │                                                │
//!   Client Request   │  ┌────────┐   ┌──────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ handlers │──▶│  contract   │  │
//!                    │  │ server │   │ validate │   │  accessor   │  │
//!                    │  └────────┘   └──────────┘   └──────┬──────┘  │
//!                    │                                     │         │
//!                    │                                     ▼         │
//!   Client Response  │  ┌──────────┐                ┌─────────────┐  │
//!   ◀────────────────┼──│ envelope │◀───────────────│ alloy       │◀─┼── RPC / contract
//!                    │  └──────────┘                │ client      │  │
//!                    │                              └─────────────┘  │
//!                    │                                                │
//!                    │  config · observability · lifecycle            │
//!                    └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use land_gateway::config::{load_config, GatewayConfig};
use land_gateway::contract::RegistryAccessor;
use land_gateway::http::HttpServer;
use land_gateway::lifecycle::{spawn_signal_handler, Shutdown};
use land_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "land-gateway")]
#[command(about = "HTTP gateway for the land registry contract", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "land-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.contract.rpc_url,
        contract = %config.contract.contract_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if let Some(metrics_address) = &config.observability.metrics_address {
        match metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let accessor = Arc::new(RegistryAccessor::new(config.contract.clone()));

    // Warm up the contract handle; on failure the first request retries
    // through the accessor's lazy acquire path.
    if let Err(e) = accessor.initialize().await {
        tracing::warn!(error = %e, "Contract initialization deferred to first request");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Arc::new(Shutdown::new());
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, accessor);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
