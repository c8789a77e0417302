//! SQLite hierarchy introspection.

use async_trait::async_trait;
use sqlx::Row;

use super::connection::SqliteEngine;
use crate::error::{Error, Result};
use crate::traits::{SchemaIntrospection, Vendor};

#[async_trait]
impl SchemaIntrospection for SqliteEngine {
    async fn get_catalogs(&self) -> Result<Vec<String>> {
        Err(Error::unsupported(Vendor::SQLite, "catalogs"))
    }

    async fn get_namespaces(&self) -> Result<Vec<String>> {
        // `main`, `temp` once used, then attached databases in attach order
        let rows = sqlx::query("PRAGMA database_list")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::engine(Vendor::SQLite, "get_namespaces", e))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::engine(Vendor::SQLite, "get_namespaces", e))
    }
}
