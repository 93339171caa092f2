//! CORS-enabled reverse proxy for a fixed upstream REST API.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 PROXY                         │
//!     Client Request     │  ┌──────┐  ┌────────────┐  ┌──────────────┐  │
//!     ───────────────────┼─▶│ CORS │─▶│ request id │─▶│ templated or │  │
//!                        │  │      │  │  + trace   │  │  wildcard    │  │
//!                        │  └──────┘  └────────────┘  └──────┬───────┘  │
//!                        │                                   │          │
//!                        │                      resolver ◀───┤          │
//!                        │                                   ▼          │
//!     Client Response    │                          ┌──────────────┐    │
//!     ◀──────────────────┼──── envelope / raw JSON ─│   upstream   │◀───┼──── Upstream API
//!                        │                          │    client    │    │
//!                        │                          └──────────────┘    │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use anime_api_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig, ProxyMode};
use anime_api_proxy::observability::{logging, metrics};
use anime_api_proxy::{HttpServer, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "anime-api-proxy", version, about = "CORS-enabled reverse proxy for a fixed upstream API")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Routing component to serve.
    #[arg(short, long, value_enum)]
    mode: Option<CliMode>,

    /// Port to listen on (defaults to 5000 templated, 3000 wildcard).
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CliMode {
    Templated,
    Wildcard,
}

impl From<CliMode> for ProxyMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Templated => ProxyMode::Templated,
            CliMode::Wildcard => ProxyMode::Wildcard,
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<ProxyConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(port) = cli.port {
        config.listener.port = Some(port);
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = %config.mode,
        "anime-api-proxy starting"
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

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Proxy running");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signal_task = shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
