//! Event gateway.
//!
//! Accepts structured- or binary-mode events over HTTP, logs them, and echoes
//! each one back in the configured reply encoding.
//!
//! ```text
//!     POST /  ──▶  codec::decoder  ──▶  Event  ──▶  log
//!                                         │
//!     reply   ◀──  codec::encoder / marshal ◀┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cloudevents_http::config::{self, GatewayConfig};
use cloudevents_http::observability::logging;
use cloudevents_http::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "cloudevents-http")]
#[command(about = "Receive and echo structured events over HTTP", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Diagnostic verbosity (0-3), overrides the config file
    #[arg(short, long)]
    verbosity: Option<u8>,

    /// Bind address, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<GatewayConfig, config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(verbosity) = self.verbosity {
            config.observability.verbosity = verbosity;
        }
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }

        config::validate_config(&config).map_err(config::ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init(&config.observability)?;

    tracing::info!("cloudevents-http v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_size = config.limits.max_body_size,
        request_timeout_secs = config.timeouts.request_secs,
        verbosity = config.observability.verbosity,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
