//! Shared helpers: an in-memory view store and a router driver.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use dotpulse::config::{AppConfig, CorsOrigins};
use dotpulse::db::ViewStore;
use dotpulse::models::view_query::ViewQuery;
use dotpulse::{create_router, AppState};

#[derive(Debug, Clone)]
enum Reply {
    Rows(Vec<Value>),
    Fail,
}

/// View store answering from canned replies keyed by view name.
///
/// Views without a reply return zero rows.
#[derive(Debug, Clone, Default)]
pub struct MockViewStore {
    replies: HashMap<&'static str, Reply>,
    ping_fails: bool,
    executed: Arc<Mutex<Vec<String>>>,
}

impl MockViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, view: &'static str, rows: Vec<Value>) -> Self {
        self.replies.insert(view, Reply::Rows(rows));
        self
    }

    pub fn failing(mut self, view: &'static str) -> Self {
        self.replies.insert(view, Reply::Fail);
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.ping_fails = true;
        self
    }

    /// SQL text of every query run so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

fn connection_refused() -> sqlx::Error {
    sqlx::Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

impl ViewStore for MockViewStore {
    async fn fetch_rows(&self, query: &ViewQuery) -> Result<Vec<Value>, sqlx::Error> {
        self.executed.lock().unwrap().push(query.sql());
        match self.replies.get(query.view()) {
            Some(Reply::Rows(rows)) => Ok(rows.clone()),
            Some(Reply::Fail) => Err(connection_refused()),
            None => Ok(Vec::new()),
        }
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.ping_fails {
            Err(connection_refused())
        } else {
            Ok(())
        }
    }
}

pub fn test_config(legacy_status_codes: bool) -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        legacy_status_codes,
    }
}

pub fn app_with_config(store: MockViewStore, config: AppConfig) -> Router {
    create_router(AppState::new(store, config))
}

pub fn app(store: MockViewStore) -> Router {
    create_router(AppState::new(store, test_config(false)))
}

pub fn legacy_app(store: MockViewStore) -> Router {
    create_router(AppState::new(store, test_config(true)))
}

/// Issue a GET and return the status and raw body text.
pub async fn get(app: Router, path: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Issue a GET and parse the body as JSON.
pub async fn get_json(app: Router, path: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, path).await;
    let value = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("{path}: body is not JSON ({e}): {body}"));
    (status, value)
}
