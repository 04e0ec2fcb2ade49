//! Standalone readiness server.
//!
//! Serves liveness and readiness endpoints for checks declared in a TOML
//! config file:
//!
//! ```toml
//! [server]
//! address = "0.0.0.0:3674"
//!
//! [[probes]]
//! name = "postgres"
//! kind = "tcp"
//! address = "db.internal:5432"
//!
//! [[probes]]
//! name = "migrations"
//! kind = "file"
//! path = "/var/run/app/migrated"
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::time::Instant;

use readysrv::config::{load_config, FileConfig};
use readysrv::health::probes;
use readysrv::lifecycle::shutdown_signal;
use readysrv::observability::{init_tracing, LogFormat};
use readysrv::ReadyServer;

#[derive(Parser)]
#[command(name = "readysrv")]
#[command(about = "Liveness and readiness probe server", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address; overrides the config file and FLEX_READYSRV_ADDR.
    #[arg(short, long)]
    address: Option<String>,

    /// Readiness route; overrides the config file and FLEX_READYSRV_READINESS_PATH.
    #[arg(long)]
    readiness_path: Option<String>,

    /// Liveness route; overrides the config file and FLEX_READYSRV_LIVENESS_PATH.
    #[arg(long)]
    liveness_path: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    tracing::info!("readysrv v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };

    let mut overrides = config.overrides();
    if cli.address.is_some() {
        overrides.address = cli.address;
    }
    if cli.readiness_path.is_some() {
        overrides.readiness_path = cli.readiness_path;
    }
    if cli.liveness_path.is_some() {
        overrides.liveness_path = cli.liveness_path;
    }

    let checks = probes::from_config(&config.probes);
    tracing::info!(checks = checks.len(), "Configuration loaded");

    let server = Arc::new(ReadyServer::builder(checks).overrides(overrides).build());

    let drain = Duration::from_secs(config.shutdown.drain_secs);
    let stopper = server.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        if let Err(e) = stopper.halt(Instant::now() + drain).await {
            tracing::error!(error = %e, "Graceful shutdown did not complete");
            std::process::exit(1);
        }
    });

    server.run().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
