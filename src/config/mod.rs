use std::env;

use axum::http::HeaderValue;

/// Configuration problems detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing {
        name: &'static str,
        #[source]
        source: env::VarError,
    },

    #[error("CORS_ORIGINS lists no origins")]
    NoCorsOrigins,

    #[error("Invalid CORS origin: {0:?}")]
    InvalidCorsOrigin(String),
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

impl CorsOrigins {
    /// Parse `*` or a comma-separated list of `http(s)://` origins.
    ///
    /// A `*` anywhere in the list allows any origin.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if entries.is_empty() {
            return Err(ConfigError::NoCorsOrigins);
        }
        if entries.contains(&"*") {
            return Ok(Self::Any);
        }

        entries
            .into_iter()
            .map(|origin| {
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(ConfigError::InvalidCorsOrigin(origin.to_string()));
                }
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::List)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub cors_origins: CorsOrigins,
    /// Answer failures with the 402/401 codes older clients expect.
    pub legacy_status_codes: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").map_err(|source| ConfigError::Missing {
                name: "DATABASE_URL",
                source,
            })?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            cors_origins: CorsOrigins::parse(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            )?,
            legacy_status_codes: env::var("LEGACY_STATUS_CODES")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
