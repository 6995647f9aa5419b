//! Query dispatcher: runs a view descriptor and shapes the result.

use serde_json::Value;

use crate::db::ViewStore;
use crate::errors::AppError;
use crate::models::view_query::{ResponseMode, ViewQuery};

/// Execute `query` against `store` and build the response body.
///
/// Zero rows is a failure, not an empty payload. Array responses are capped at
/// the descriptor's row limit even if the store returns more.
pub async fn run<S: ViewStore>(store: &S, query: &ViewQuery) -> Result<Value, AppError> {
    let mut rows = match store.fetch_rows(query).await {
        Ok(rows) => rows,
        Err(source) => {
            tracing::error!(
                label = query.label,
                view = query.view,
                query = %query.sql(),
                error = %source,
                "View query failed"
            );
            return Err(AppError::QueryFailed {
                label: query.label,
                source,
            });
        }
    };

    if rows.is_empty() {
        tracing::error!(
            label = query.label,
            view = query.view,
            query = %query.sql(),
            "View query returned no rows"
        );
        return Err(AppError::EmptyResult { label: query.label });
    }

    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }
    tracing::info!(label = query.label, rows = rows.len(), "View query succeeded");

    Ok(match query.mode {
        ResponseMode::SingleRow => rows.swap_remove(0),
        ResponseMode::RowArray => Value::Array(rows),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::models::view_query::{
        RECENT_COMMITS, RECENT_COMMITS_LIMIT, STATISTICS, TOP_CONTRIBUTORS,
    };

    #[derive(Debug, Clone)]
    enum FixedStore {
        Rows(Vec<Value>),
        Broken,
    }

    impl ViewStore for FixedStore {
        async fn fetch_rows(&self, _query: &ViewQuery) -> Result<Vec<Value>, sqlx::Error> {
            match self {
                Self::Rows(rows) => Ok(rows.clone()),
                Self::Broken => Err(sqlx::Error::PoolClosed),
            }
        }

        async fn ping(&self) -> Result<(), sqlx::Error> {
            Ok(())
        }
    }

    fn contributor(n: u32) -> Value {
        json!({
            "dev_name": format!("dev_name{n}"),
            "avatar_url": format!("avatar_url{n}"),
            "contributions": format!("{}", n * 100),
        })
    }

    #[tokio::test]
    async fn array_mode_returns_rows_unchanged() {
        let rows: Vec<Value> = (1..=5).map(contributor).collect();
        let store = FixedStore::Rows(rows.clone());

        let body = assert_ok!(run(&store, &TOP_CONTRIBUTORS).await);
        assert_eq!(body, Value::Array(rows));
    }

    #[tokio::test]
    async fn single_row_mode_returns_first_row_only() {
        let store = FixedStore::Rows(vec![json!({"commits": "1"}), json!({"commits": "2"})]);

        let body = assert_ok!(run(&store, &STATISTICS).await);
        assert_eq!(body, json!({"commits": "1"}));
    }

    #[tokio::test]
    async fn empty_rows_is_empty_result() {
        let store = FixedStore::Rows(Vec::new());

        let err = assert_err!(run(&store, &TOP_CONTRIBUTORS).await);
        assert!(err.is_empty_result());
        assert_eq!(err.label(), "topContributors");
    }

    #[tokio::test]
    async fn store_error_is_query_failed() {
        let err = assert_err!(run(&FixedStore::Broken, &STATISTICS).await);
        assert!(matches!(
            err,
            AppError::QueryFailed {
                label: "statistics",
                source: sqlx::Error::PoolClosed
            }
        ));
    }

    #[tokio::test]
    async fn recent_commits_capped() {
        let rows: Vec<Value> = (0..RECENT_COMMITS_LIMIT + 25)
            .map(|i| json!({ "commit_hash": i }))
            .collect();
        let store = FixedStore::Rows(rows);

        let body = assert_ok!(run(&store, &RECENT_COMMITS).await);
        let served = body.as_array().unwrap();
        assert_eq!(served.len(), RECENT_COMMITS_LIMIT);
        assert_eq!(served[0], json!({ "commit_hash": 0 }));
    }
}
