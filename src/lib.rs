//! Team Hex: read-only API for sports team color palettes.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use model::{LeagueRecord, LoadError, LookupError, Model, Schema, Team};
