//! Statistics routes: one GET endpoint per precomputed view.
//!
//! Handlers take no extractors besides state, so the SQL they run is fixed
//! by the descriptor constants.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use crate::db::ViewStore;
use crate::models::view_query::{self, ViewQuery};
use crate::services::dispatcher;
use crate::AppState;

async fn serve<S: ViewStore>(state: &AppState<S>, query: &ViewQuery) -> Response {
    match dispatcher::run(&state.views, query).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => state.status_codes.render(&err),
    }
}

/// GET /statistics — overall counts as a single object.
pub async fn statistics<S: ViewStore>(State(state): State<AppState<S>>) -> Response {
    serve(&state, &view_query::STATISTICS).await
}

/// GET /top_contributors — contributors by contribution count, highest first.
pub async fn top_contributors<S: ViewStore>(State(state): State<AppState<S>>) -> Response {
    serve(&state, &view_query::TOP_CONTRIBUTORS).await
}

/// GET /commits — commits per month.
pub async fn commits<S: ViewStore>(State(state): State<AppState<S>>) -> Response {
    serve(&state, &view_query::COMMITS).await
}

/// GET /active_contributors — active developers per month.
pub async fn active_contributors<S: ViewStore>(State(state): State<AppState<S>>) -> Response {
    serve(&state, &view_query::ACTIVE_CONTRIBUTORS).await
}

/// GET /recent_commits — newest commits first, capped at 1000.
pub async fn recent_commits<S: ViewStore>(State(state): State<AppState<S>>) -> Response {
    serve(&state, &view_query::RECENT_COMMITS).await
}

/// GET /repositories — repositories per month.
pub async fn repositories<S: ViewStore>(State(state): State<AppState<S>>) -> Response {
    serve(&state, &view_query::REPOSITORIES).await
}

/// GET /activity — active developers and repositories per month.
pub async fn activity<S: ViewStore>(State(state): State<AppState<S>>) -> Response {
    serve(&state, &view_query::ACTIVITY).await
}
