//! MySQL hierarchy introspection.

use async_trait::async_trait;

use super::connection::MySqlEngine;
use crate::error::{Error, Result};
use crate::traits::{SchemaIntrospection, Vendor};

#[async_trait]
impl SchemaIntrospection for MySqlEngine {
    async fn get_catalogs(&self) -> Result<Vec<String>> {
        Err(Error::unsupported(Vendor::MySQL, "catalogs"))
    }

    async fn get_namespaces(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SHOW DATABASES")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::engine(Vendor::MySQL, "get_namespaces", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{EngineTarget, EngineUrl, PoolSettings};

    #[test]
    fn test_get_catalogs_is_unsupported() {
        let url = EngineUrl::parse("mysql+pymysql://localhost:3306/shop").unwrap();
        let target = EngineTarget::new(Vendor::MySQL, url);

        let err = smol::block_on(async {
            let engine = MySqlEngine::new(target, &PoolSettings::default());
            engine.get_catalogs().await
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "MySQL does not support catalogs");
    }
}
