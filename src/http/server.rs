//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, metrics)
//! - Bind server to listener
//! - Publish reloaded models to handlers
//! - Stop gracefully on the shutdown signal

use axum::{
    http::Method,
    middleware,
    routing::get,
    Router,
};
use arc_swap::ArcSwap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::model::{timestamp, Model};
use crate::observability::metrics;

/// Version reported by the root document.
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Currently published model; swapped wholesale on reload.
    pub model: Arc<ArcSwap<Model>>,
    pub version: &'static str,
    pub swagger_path: Arc<PathBuf>,
}

/// HTTP server for the team color API.
pub struct HttpServer {
    router: Router,
    model: Arc<ArcSwap<Model>>,
}

impl HttpServer {
    /// Create a new HTTP server serving the given model.
    pub fn new(config: ServiceConfig, model: Model) -> Self {
        let model = Arc::new(ArcSwap::from_pointee(model));

        let state = AppState {
            model: model.clone(),
            version: VERSION,
            swagger_path: Arc::new(config.api.swagger_path.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, model }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::get_root))
            .route("/swagger.json", get(handlers::get_swagger))
            .route("/teams", get(handlers::get_teams))
            .route("/leagues", get(handlers::get_leagues))
            .route("/leagues/{league}", get(handlers::get_league))
            .route("/leagues/{league}/{team}", get(handlers::get_league_team))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(CorsLayer::new().allow_methods([Method::GET]).allow_origin(Any))
            .layer(propagate_request_id_layer())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Models received on `model_updates` replace the published one; requests
    /// already in flight finish against the model they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        mut model_updates: mpsc::UnboundedReceiver<Model>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let published = self.model.clone();
        tokio::spawn(async move {
            while let Some(model) = model_updates.recv().await {
                metrics::record_model(&model);
                tracing::info!(
                    teams = model.all_teams().len(),
                    leagues = model.leagues().len(),
                    generated = %timestamp::format(&model.generation_date()),
                    "Team data reloaded"
                );
                published.store(Arc::new(model));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Handle to the published model.
    pub fn model(&self) -> Arc<ArcSwap<Model>> {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    const DATA: &str = r##"{
        "generated": "2020-02-22T12:00:00Z",
        "teams": [{"name": "Apples", "colors": ["#f00"], "league": "Fruit"}]
    }"##;

    fn server() -> HttpServer {
        let model = Model::from_slice(DATA.as_bytes(), crate::model::Schema::Auto).unwrap();
        HttpServer::new(ServiceConfig::default(), model)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_routes() {
        let server = server();

        let (status, body) = get(server.router.clone(), "/leagues").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[{\"league\":\"Fruit\",\"_link\":\"/leagues/fruit\"}]\n");

        let (status, body) = get(server.router.clone(), "/leagues/vegetables").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "{\"message\":\"league not found\"}\n");
    }

    #[tokio::test]
    async fn test_store_replaces_published_model() {
        let server = server();
        let replacement = DATA.replace("Apples", "Pears");
        server
            .model()
            .store(Arc::new(Model::from_slice(replacement.as_bytes(), crate::model::Schema::Auto).unwrap()));

        let (status, _) = get(server.router.clone(), "/leagues/fruit/pears").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get(server.router.clone(), "/leagues/fruit/apples").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
