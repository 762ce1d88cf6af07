//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the team data (fatal on error)
//! - Initialize metrics and the optional data watcher
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The model is fully built before the listener is bound
//! - Listeners start last (traffic only when ready)

use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, DataWatcher, Shutdown};
use crate::model::{timestamp, LoadError, Model};
use crate::observability::metrics;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not load model: {0}")]
    Load(#[from] LoadError),

    #[error("invalid bind address '{0}'")]
    Address(String),

    #[error("could not bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("could not watch team data: {0}")]
    Watch(#[from] notify::Error),

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Load the data, start every subsystem and serve until shutdown.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let model = Model::load(&config.data.path, config.data.schema)?;
    tracing::info!(
        path = %config.data.path.display(),
        schema = %model.schema(),
        teams = model.all_teams().len(),
        leagues = model.leagues().len(),
        generated = %timestamp::format(&model.generation_date()),
        "Team data loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }
    metrics::record_model(&model);

    // Keep the watcher alive for as long as the server runs.
    let (_watcher, model_updates) = if config.data.watch {
        let (watcher, updates) = DataWatcher::new(&config.data.path, config.data.schema);
        (Some(watcher.run()?), updates)
    } else {
        let (_, updates) = mpsc::unbounded_channel();
        (None, updates)
    };

    let addr = config
        .listener
        .socket_addr()
        .map_err(|_| StartupError::Address(config.listener.bind_address.clone()))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!(
        address = %listener.local_addr().map_err(StartupError::Serve)?,
        request_timeout_secs = config.timeouts.request_secs,
        watch = config.data.watch,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config, model);
    server
        .run(listener, model_updates, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
