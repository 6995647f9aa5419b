pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod router;
pub mod routes;
pub mod services;

pub use router::create_router;

use tokio::net::TcpListener;

use db::{PgViewStore, ViewStore};
use errors::StatusCodes;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState<S = PgViewStore> {
    pub views: S,
    pub config: config::AppConfig,
    pub status_codes: StatusCodes,
}

impl<S: ViewStore> AppState<S> {
    pub fn new(views: S, config: config::AppConfig) -> Self {
        let status_codes = StatusCodes::for_legacy_clients(config.legacy_status_codes);
        Self {
            views,
            config,
            status_codes,
        }
    }
}

/// Bind the configured host and port. The host may be a name or an IP literal.
pub async fn bind_listener(config: &config::AppConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port)).await
}
