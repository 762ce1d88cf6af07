//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use teamhex::config::ServiceConfig;
use teamhex::http::HttpServer;
use teamhex::lifecycle::Shutdown;
use teamhex::model::{Model, Schema};

/// Path of a file under `testdata/`.
pub fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

/// Load a fixture model.
#[allow(dead_code)]
pub fn load_model(name: &str) -> Model {
    Model::load(testdata(name), Schema::Auto).unwrap()
}

/// A server running in the background on an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<Model>,
}

impl TestServer {
    /// URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server for the given model and wait until it accepts connections.
pub async fn start_server(config: ServiceConfig, model: Model) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates, model_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config, model);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, model_updates, server_shutdown).await;
    });

    // The listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        updates,
    }
}

/// Client that never reuses connections across tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
