//! View query failures and their mapping to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure of a single view query. Both kinds are terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The query ran but the view returned no rows.
    #[error("Failed to get {label}")]
    EmptyResult { label: &'static str },

    /// The query itself failed (connectivity, SQL error, timeout).
    #[error("failed to get {label}")]
    QueryFailed {
        label: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Label of the endpoint that failed.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmptyResult { label } | Self::QueryFailed { label, .. } => *label,
        }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

/// Status codes used for the two failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCodes {
    pub empty_result: StatusCode,
    pub query_failed: StatusCode,
}

impl StatusCodes {
    /// `404` for an empty view, `500` for a failed query.
    pub const CONVENTIONAL: Self = Self {
        empty_result: StatusCode::NOT_FOUND,
        query_failed: StatusCode::INTERNAL_SERVER_ERROR,
    };

    /// Codes expected by existing dashboard clients: `402` for an empty view,
    /// `401` for a failed query.
    pub const LEGACY: Self = Self {
        empty_result: StatusCode::PAYMENT_REQUIRED,
        query_failed: StatusCode::UNAUTHORIZED,
    };

    pub fn for_legacy_clients(legacy: bool) -> Self {
        if legacy {
            Self::LEGACY
        } else {
            Self::CONVENTIONAL
        }
    }

    pub fn status_of(&self, err: &AppError) -> StatusCode {
        match err {
            AppError::EmptyResult { .. } => self.empty_result,
            AppError::QueryFailed { .. } => self.query_failed,
        }
    }

    /// Plain-text error response naming the failed operation.
    pub fn render(&self, err: &AppError) -> Response {
        (self.status_of(err), err.to_string()).into_response()
    }
}

impl Default for StatusCodes {
    fn default() -> Self {
        Self::CONVENTIONAL
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        StatusCodes::default().render(&self)
    }
}
