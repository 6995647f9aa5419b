//! Database connection pool and the view store used by the dispatcher.

pub mod row_json;

use std::future::Future;

use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::view_query::ViewQuery;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Read access to the precomputed statistics views.
///
/// Each row comes back as a JSON object keyed by column name, in the order
/// the query produced it.
pub trait ViewStore: Send + Sync + Clone + 'static {
    /// Run the descriptor's query and return every row.
    fn fetch_rows(
        &self,
        query: &ViewQuery,
    ) -> impl Future<Output = Result<Vec<Value>, sqlx::Error>> + Send;

    /// Round-trip check used by the readiness probe.
    fn ping(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

/// [`ViewStore`] backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgViewStore {
    pool: PgPool,
}

impl PgViewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ViewStore for PgViewStore {
    async fn fetch_rows(&self, query: &ViewQuery) -> Result<Vec<Value>, sqlx::Error> {
        let sql = query.sql();
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_json::encode_row).collect()
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
