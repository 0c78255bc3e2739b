//! Route coverage debug server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 ROUTE FRONTIER                    │
//!                    │                                                   │
//!   Client Request   │  ┌─────────┐    ┌──────────────┐                  │
//!   ─────────────────┼─▶│  http   │───▶│   routing    │── match ──▶ 200  │
//!                    │  │ server  │    │  dispatch    │                  │
//!                    │  └─────────┘    └──────┬───────┘                  │
//!                    │                        │ no match                 │
//!                    │                        ▼                          │
//!                    │                 ┌──────────────┐                  │
//!   Client Response  │                 │    debug     │                  │
//!   ◀────────────────┼──────── 404 ◀───│ frontier walk│                  │
//!                    │                 │ + grouping   │                  │
//!                    │                 └──────────────┘                  │
//!                    │                                                   │
//!                    │  ┌─────────────────────────────────────────────┐ │
//!                    │  │            Cross-Cutting Concerns            │ │
//!                    │  │  config + watcher │ observability │ lifecycle│ │
//!                    │  └─────────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use route_frontier::config::{load_config, watcher::ConfigWatcher, FrontierConfig};
use route_frontier::lifecycle::{signals::shutdown_signal, Shutdown};
use route_frontier::observability::{logging, metrics};
use route_frontier::HttpServer;

#[derive(Parser)]
#[command(name = "route-frontier")]
#[command(about = "Development server with a route coverage 404 page", long_about = None)]
struct Args {
    /// TOML configuration file. Watched for changes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FrontierConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("route-frontier v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        apps = config.apps.len(),
        debug = config.debug,
        "Configuration loaded"
    );

    if !config.debug {
        tracing::info!("Debug mode off, unmatched requests get a plain 404");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Watcher must outlive the server.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
