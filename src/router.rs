//! Router configuration and route composition.

use std::time::Duration;

use axum::http::Method;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::CorsOrigins;
use crate::db::ViewStore;
use crate::routes::{health, stats};
use crate::AppState;

/// Creates the application router with all routes and middleware.
pub fn create_router<S: ViewStore>(state: AppState<S>) -> Router {
    let cors_layer = build_cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready::<S>))
        .route("/statistics", get(stats::statistics::<S>))
        .route("/top_contributors", get(stats::top_contributors::<S>))
        .route("/commits", get(stats::commits::<S>))
        .route("/active_contributors", get(stats::active_contributors::<S>))
        .route("/recent_commits", get(stats::recent_commits::<S>))
        .route("/repositories", get(stats::repositories::<S>))
        .route("/activity", get(stats::activity::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configuration.
fn build_cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600));

    match origins {
        CorsOrigins::Any => cors.allow_origin(tower_http::cors::Any),
        CorsOrigins::List(allowed) => cors.allow_origin(allowed.clone()),
    }
}
