//! Edge Admin console server.
//!
//! ```text
//!  browser ──▶ http server ──▶ route table ──▶ helpers ──▶ action
//!                                                            │
//!                                      templates ◀── data ◀──┤
//!                                                            ▼
//!                                                     management backend
//!                                                       (JSON over HTTP)
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use edge_admin::admin;
use edge_admin::config::load_config;
use edge_admin::lifecycle::{signals, Shutdown};
use edge_admin::net::load_tls_config;
use edge_admin::observability::{logging, metrics};
use edge_admin::AdminServer;

#[derive(Parser)]
#[command(name = "edge-admin")]
#[command(about = "Admin console for edge node clusters", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "configs/edge-admin.toml")]
    config: PathBuf,

    /// Validate the configuration and route table, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load {}: {}", cli.config.display(), e);
            std::process::exit(2);
        }
    };

    logging::init_logging(&config.observability);

    if cli.check {
        let routes = admin::routes()?;
        tracing::info!(
            config = %cli.config.display(),
            routes = routes.len(),
            "Configuration OK"
        );
        return Ok(());
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        endpoints = ?config.rpc.endpoints,
        "edge-admin starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let tls = config.listener.tls.clone();
    let bind_address = config.listener.bind_address.clone();
    let server = AdminServer::new(config)?;

    match tls {
        Some(tls) => {
            let addr: SocketAddr = bind_address.parse()?;
            let rustls = load_tls_config(&tls).await?;
            server.run_tls(addr, rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(&bind_address).await?;
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
