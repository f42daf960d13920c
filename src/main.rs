//! tinysocks - minimal SOCKS5 proxy server

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tinysocks::{config::ConfigManager, shutdown, ConnectionManager};

/// CLI arguments for tinysocks
#[derive(Parser, Debug)]
#[command(name = "tinysocks")]
#[command(about = "Minimal no-auth SOCKS5 CONNECT proxy")]
#[command(version)]
pub struct CliArgs {
    /// Local port to listen on (all interfaces)
    #[arg(long, default_value = "10800")]
    pub port: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    init_tracing();

    let config = match ConfigManager::from_port_arg(&args.port) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(2);
        }
    };

    info!(
        "Starting tinysocks v{} with {}",
        env!("CARGO_PKG_VERSION"),
        config.summary()?
    );

    let manager = ConnectionManager::bind(Arc::new(config)).await?;

    tokio::select! {
        result = manager.serve() => {
            if let Err(e) = &result {
                error!("Server error: {:#}", e);
            }
            result
        }
        result = shutdown::wait_for_signal() => {
            info!("Server shutdown complete");
            result
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(true)
                .with_level(true),
        )
        .with(env_filter)
        .init();
}
