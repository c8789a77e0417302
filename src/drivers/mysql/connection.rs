//! MySQL engine implementation.
//!
//! This module implements the `DatabaseEngine` trait for MySQL
//! using SQLx's MySqlPool.

use async_trait::async_trait;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

use super::types::MySqlOptionsConverter;
use crate::error::{Error, Result};
use crate::traits::{BoxedEngine, DatabaseEngine, EngineTarget, PoolSettings, Vendor};

/// MySQL engine.
///
/// Wraps a lazily-connecting SQLx MySqlPool.
pub struct MySqlEngine {
    target: EngineTarget,
    pub(super) pool: MySqlPool,
}

impl std::fmt::Debug for MySqlEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlEngine")
            .field("url", &self.target.url.to_masked_string())
            .field("pool", &"<MySqlPool>")
            .finish()
    }
}

impl MySqlEngine {
    /// Create an engine for a target.
    ///
    /// No connection is opened until the first query.
    pub fn new(target: EngineTarget, settings: &PoolSettings) -> Self {
        let options = MySqlOptionsConverter::connect_options(&target);
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout())
            .connect_lazy_with(options);

        tracing::info!(url = %target.url.to_masked_string(), "Created MySQL engine");

        Self { target, pool }
    }

    /// Create a boxed engine (for factory use).
    pub fn boxed(target: EngineTarget, settings: &PoolSettings) -> BoxedEngine {
        Box::new(Self::new(target, settings))
    }
}

#[async_trait]
impl DatabaseEngine for MySqlEngine {
    fn vendor(&self) -> Vendor {
        Vendor::MySQL
    }

    fn target(&self) -> &EngineTarget {
        &self.target
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        let result = sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::engine(Vendor::MySQL, "execute", e))?;
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!(url = %self.target.url.to_masked_string(), "Closed MySQL engine");
    }
}
