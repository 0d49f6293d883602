//! User service.
//!
//! ```text
//!     Client                    user-service                     name-service
//!     ──────  GET /users  ──▶  ┌──────────────┐  GET /names  ──▶  ──────────
//!                              │ request id   │
//!                              │ trace        │
//!                              │ timeout      │
//!                              │ list_users   │
//!     ◀── 200 ["alice",...] ── └──────────────┘  ◀── 200 [...] ──
//!         502 / 504 on failure
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use user_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use user_service::lifecycle::{spawn_signal_listener, Shutdown};
use user_service::observability::{logging, metrics};
use user_service::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "user-service")]
#[command(about = "Serves GET /users by relaying the name-service's list", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override upstream.names_url.
    #[arg(long)]
    names_url: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(url) = self.names_url {
            config.upstream.names_url = url;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        names_url = %config.upstream.names_url,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
