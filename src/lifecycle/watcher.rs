//! Team data file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;
use notify::{Watcher, RecursiveMode, Event, RecommendedWatcher, Config};
use tokio::sync::mpsc;
use crate::model::{Model, Schema};
use crate::observability::metrics;

/// A watcher that rebuilds the model whenever the data file changes.
pub struct DataWatcher {
    path: PathBuf,
    schema: Schema,
    update_tx: mpsc::UnboundedSender<Model>,
}

impl DataWatcher {
    /// Create a new DataWatcher.
    ///
    /// Returns the watcher and a receiver for freshly built models.
    pub fn new(path: &Path, schema: Schema) -> (Self, mpsc::UnboundedReceiver<Model>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (Self {
            path: path.to_path_buf(),
            schema,
            update_tx,
        }, update_rx)
    }

    /// Start watching the file in a background thread.
    ///
    /// The parent directory is watched so that files replaced by rename are
    /// still picked up. A file that fails to load is logged and skipped; the
    /// receiver only ever sees complete models.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let schema = self.schema;
        let file_name = path.file_name().map(|name| name.to_os_string());
        let dir = watch_dir(&self.path);

        let mut watcher = RecommendedWatcher::new(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    if !event.paths.iter().any(|p| p.file_name() == file_name.as_deref()) {
                        return;
                    }

                    tracing::info!(path = ?path, "Team data change detected, reloading...");
                    match Model::load(&path, schema) {
                        Ok(model) => {
                            metrics::record_reload("success");
                            let _ = tx.send(model);
                        }
                        Err(e) => {
                            metrics::record_reload("failure");
                            tracing::error!(error = %e, "Failed to reload team data. Keeping current model.");
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            }
        }, Config::default().with_poll_interval(Duration::from_secs(2)))?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Team data watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
