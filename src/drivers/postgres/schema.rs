//! PostgreSQL hierarchy introspection.

use async_trait::async_trait;

use super::connection::PostgresEngine;
use crate::error::{Error, Result};
use crate::traits::{SchemaIntrospection, Vendor};

const CATALOGS_QUERY: &str = r#"
    SELECT datname
    FROM pg_database
    WHERE datistemplate = false
    ORDER BY datname
"#;

const NAMESPACES_QUERY: &str = r#"
    SELECT schema_name
    FROM information_schema.schemata
    ORDER BY schema_name
"#;

#[async_trait]
impl SchemaIntrospection for PostgresEngine {
    async fn get_catalogs(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(CATALOGS_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::engine(Vendor::PostgreSQL, "get_catalogs", e))
    }

    async fn get_namespaces(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(NAMESPACES_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::engine(Vendor::PostgreSQL, "get_namespaces", e))
    }
}
