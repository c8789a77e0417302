//! PostgreSQL engine implementation.
//!
//! This module implements the `DatabaseEngine` trait for PostgreSQL
//! using SQLx's PgPool.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use super::types::PgOptionsConverter;
use crate::error::{Error, Result};
use crate::settings::get_settings;
use crate::traits::{BoxedEngine, DatabaseEngine, EngineTarget, PoolSettings, Vendor};

/// PostgreSQL engine.
///
/// Wraps a lazily-connecting SQLx PgPool. When the target pins a namespace,
/// every new connection runs `SET search_path` before it is handed out.
pub struct PostgresEngine {
    target: EngineTarget,
    pub(super) pool: PgPool,
}

impl std::fmt::Debug for PostgresEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresEngine")
            .field("url", &self.target.url.to_masked_string())
            .field("search_path", &self.target.search_path)
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PostgresEngine {
    /// Create an engine for a target.
    ///
    /// No connection is opened until the first query.
    pub fn new(target: EngineTarget, settings: &PoolSettings) -> Self {
        let options = PgOptionsConverter::connect_options(&target);
        let mut pool_options = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout());

        if let Some(namespace) = &target.search_path {
            let statement = search_path_statement(namespace);
            pool_options = pool_options.after_connect(move |conn, _meta| {
                let statement = statement.clone();
                Box::pin(async move {
                    conn.execute(statement.as_str()).await?;
                    Ok(())
                })
            });
        }

        tracing::info!(
            url = %target.url.to_masked_string(),
            search_path = ?target.search_path,
            "Created PostgreSQL engine"
        );

        Self {
            pool: pool_options.connect_lazy_with(options),
            target,
        }
    }

    /// Create a boxed engine (for factory use).
    pub fn boxed(target: EngineTarget, settings: &PoolSettings) -> BoxedEngine {
        Box::new(Self::new(target, settings))
    }

    /// Reject statements that would move the session off its pinned namespace.
    fn check_namespace(&self, sql: &str) -> Result<()> {
        let Some(namespace) = &self.target.search_path else {
            return Ok(());
        };
        let settings = get_settings(sql, Vendor::PostgreSQL);
        let moved = settings
            .get("search_path")
            .is_some_and(|value| value.trim_matches('"') != namespace.as_str());
        if moved {
            tracing::warn!(namespace = %namespace, "Rejected statement changing search_path");
            return Err(Error::NamespaceChange {
                namespace: namespace.clone(),
            });
        }
        Ok(())
    }
}

/// `SET search_path` statement with the namespace quoted as an identifier.
fn search_path_statement(namespace: &str) -> String {
    format!("SET search_path = \"{}\"", namespace.replace('"', "\"\""))
}

#[async_trait]
impl DatabaseEngine for PostgresEngine {
    fn vendor(&self) -> Vendor {
        Vendor::PostgreSQL
    }

    fn target(&self) -> &EngineTarget {
        &self.target
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        self.check_namespace(sql)?;

        let result = sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::engine(Vendor::PostgreSQL, "execute", e))?;
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!(url = %self.target.url.to_masked_string(), "Closed PostgreSQL engine");
    }
}
