//! Team Hex API server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                   TEAMHEX                     │
//!                    │                                               │
//!   teamhex.json ────┼─▶ model::loader ─▶ model::index ─▶ Model      │
//!                    │                                     │         │
//!                    │             lifecycle::watcher ──▶ ArcSwap    │
//!                    │                (reload)             │         │
//!                    │                                     ▼         │
//!   Client Request ──┼─▶ http::server ─▶ http::handlers ─▶ query     │
//!   Client Response ◀┼── http::response ◀─────────────────┘         │
//!                    │                                               │
//!                    │  config · observability · lifecycle           │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use teamhex::config::{read_config, validate_config, ConfigError, ServiceConfig};
use teamhex::lifecycle::startup;
use teamhex::model::Schema;
use teamhex::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "teamhex")]
#[command(about = "Serves sports team colors over HTTP", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (e.g. ":5000")
    #[arg(long)]
    addr: Option<String>,

    /// Path to the JSON colors file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Team record layout: auto, eras or flat
    #[arg(long)]
    schema: Option<Schema>,

    /// Reload the colors file when it changes
    #[arg(long)]
    watch: bool,
}

impl Cli {
    /// Apply command line overrides on top of the file configuration.
    fn apply(&self, config: &mut ServiceConfig) {
        if let Some(addr) = &self.addr {
            config.listener.bind_address = addr.clone();
        }
        if let Some(file) = &self.file {
            config.data.path = file.clone();
        }
        if let Some(schema) = self.schema {
            config.data.schema = schema;
        }
        if self.watch {
            config.data.watch = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);

    tracing::info!("teamhex {} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
