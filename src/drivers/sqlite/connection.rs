//! SQLite engine implementation.
//!
//! This module implements the `DatabaseEngine` trait for SQLite
//! using SQLx's SqlitePool. Both file-based and in-memory databases are
//! supported.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::params::MEMORY_PATH;
use crate::error::{Error, Result};
use crate::traits::{BoxedEngine, DatabaseEngine, EngineTarget, PoolSettings, Vendor};

/// SQLite engine.
pub struct SqliteEngine {
    target: EngineTarget,
    pub(super) pool: SqlitePool,
}

impl std::fmt::Debug for SqliteEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteEngine")
            .field("url", &self.target.url.to_string())
            .field("pool", &"<SqlitePool>")
            .finish()
    }
}

impl SqliteEngine {
    /// Create an engine for a target.
    ///
    /// No connection is opened until the first query.
    ///
    /// # Errors
    ///
    /// Returns an `Engine` error if the in-memory connect options cannot be
    /// built.
    pub fn new(target: EngineTarget, settings: &PoolSettings) -> Result<Self> {
        let options = Self::connect_options(&target)
            .map_err(|e| Error::engine(Vendor::SQLite, "create_engine", e))?;
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout())
            .connect_lazy_with(options);

        tracing::info!(url = %target.url, "Created SQLite engine");

        Ok(Self { target, pool })
    }

    /// Create a boxed engine (for factory use).
    pub fn boxed(target: EngineTarget, settings: &PoolSettings) -> Result<BoxedEngine> {
        Ok(Box::new(Self::new(target, settings)?))
    }

    /// Build SqliteConnectOptions from the target URL.
    fn connect_options(target: &EngineTarget) -> std::result::Result<SqliteConnectOptions, sqlx::Error> {
        let read_only = target.url.query.get("mode").is_some_and(|mode| mode == "ro");

        match target.url.database.as_deref() {
            None | Some(MEMORY_PATH) => {
                // Shared cache so every pooled connection sees the same database
                Ok(SqliteConnectOptions::from_str(MEMORY_PATH)?.shared_cache(true))
            }
            Some(path) => Ok(SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(!read_only)
                .read_only(read_only)),
        }
    }
}

#[async_trait]
impl DatabaseEngine for SqliteEngine {
    fn vendor(&self) -> Vendor {
        Vendor::SQLite
    }

    fn target(&self) -> &EngineTarget {
        &self.target
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        let result = sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::engine(Vendor::SQLite, "execute", e))?;
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!(url = %self.target.url, "Closed SQLite engine");
    }
}
