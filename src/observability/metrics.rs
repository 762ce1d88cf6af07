//! Metrics collection and exposition.
//!
//! # Metrics
//! - `teamhex_requests_total` (counter): requests by method, status, route
//! - `teamhex_request_duration_seconds` (histogram): latency distribution
//! - `teamhex_teams_loaded` (gauge): teams in the published model
//! - `teamhex_leagues_loaded` (gauge): leagues in the published model
//! - `teamhex_reloads_total` (counter): data reloads by outcome
//!
//! Recording is a no-op until a recorder is installed, so these helpers are
//! safe to call with metrics disabled.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::model::Model;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one served request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("route", route.to_string()),
    ];
    metrics::counter!("teamhex_requests_total", &labels).increment(1);
    metrics::histogram!("teamhex_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record the size of a newly published model.
pub fn record_model(model: &Model) {
    metrics::gauge!("teamhex_teams_loaded").set(model.all_teams().len() as f64);
    metrics::gauge!("teamhex_leagues_loaded").set(model.leagues().len() as f64);
}

/// Record the outcome of a data reload ("success" or "failure").
pub fn record_reload(outcome: &'static str) {
    metrics::counter!("teamhex_reloads_total", "outcome" => outcome).increment(1);
}

/// Middleware recording request count and latency per matched route.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), &route, start);
    response
}
