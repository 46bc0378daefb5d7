//! Command relay gateway.
//!
//! A small web server that serves the control UI's static assets and
//! forwards `?command=` queries to a backend control service over a
//! line-oriented TCP protocol, one transient connection per request.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │               COMMAND GATEWAY                │
//!                       │                                              │
//!   HTTP request        │  ┌──────────┐     ┌────────────────────┐     │
//!   ────────────────────┼─▶│ dispatch │──┬─▶│  assets (files on  │     │
//!                       │  │ classify │  │  │  disk + ctype map) │     │
//!                       │  └──────────┘  │  └────────────────────┘     │
//!                       │                │                             │
//!                       │                │  ┌────────┐   ┌──────────┐  │
//!                       │                └─▶│ relay  │──▶│ backend  │──┼──▶ control
//!   HTTP response       │                   │session │   │connector │  │    service
//!   ◀───────────────────┼───────────────────┴────────┘   └──────────┘  │    (TCP)
//!                       │                                              │
//!                       │  config · lifecycle · observability          │
//!                       └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use command_gateway::config::{self, GatewayConfig};
use command_gateway::http::HttpServer;
use command_gateway::lifecycle::Shutdown;
use command_gateway::observability::logging;

/// Web gateway for a TCP control service.
#[derive(Parser, Debug)]
#[command(name = "command-gateway", version)]
struct Cli {
    /// HTTP listening port. Overrides the config file's listener port.
    port: Option<u16>,

    /// Path to the configuration file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Verbose logging (-v for request/reply traffic, -vv for every asset hit).
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "command-gateway starting");

    // A missing or broken config file is not fatal: run on documented defaults.
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let mut config = match config::load_config(&config_path) {
        Ok(cfg) => {
            tracing::info!(path = %config_path.display(), "Configuration loaded");
            cfg
        }
        Err(e) => {
            tracing::warn!(
                path = %config_path.display(),
                error = %e,
                "Configuration unavailable, using defaults"
            );
            GatewayConfig::default()
        }
    };
    if let Some(port) = cli.port {
        config.listener.set_port(port);
    }

    tracing::info!(
        backend_host = %config.backend.host,
        backend_port = config.backend.port,
        control_port = config.backend.port + 1,
        "Using control service address"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
