//! Engine factory for building targets and engines from raw payloads.
//!
//! The factory picks the registered schema matching a payload's `engine` and
//! `driver` keys and hands the payload to it.

use serde_json::{Map, Value};

use super::mysql::MySqlSchema;
use super::postgres::PostgresSchema;
use super::sqlite::SqliteSchema;
use crate::error::{Error, Result};
use crate::traits::{BoxedEngine, EngineTarget, PoolSettings, VendorSchema};

/// Every registered vendor schema, in lookup order.
pub fn schemas() -> Vec<&'static dyn VendorSchema> {
    vec![&PostgresSchema, &MySqlSchema, &SqliteSchema]
}

/// Return the first schema handling `engine[+driver]`.
pub fn find_schema(engine: &str, driver: Option<&str>) -> Option<&'static dyn VendorSchema> {
    schemas()
        .into_iter()
        .find(|schema| schema.matches(engine, driver))
}

/// Factory for creating targets and engines from payloads.
///
/// # Example
///
/// ```ignore
/// use enginator::drivers::EngineFactory;
///
/// let data = serde_json::json!({"engine": "sqlite", "path": ":memory:"});
/// let engine = EngineFactory::get_engine(data.as_object().unwrap(), None, None)?;
/// ```
pub struct EngineFactory;

impl EngineFactory {
    /// Find the schema for a payload.
    ///
    /// # Errors
    ///
    /// Returns `NoSchema` if the payload has no `engine` key or no registered
    /// schema supports the engine and driver.
    pub fn schema_for(data: &Map<String, Value>) -> Result<&'static dyn VendorSchema> {
        let engine = data.get("engine").and_then(Value::as_str);
        let driver = data.get("driver").and_then(Value::as_str);

        engine
            .and_then(|engine| find_schema(engine, driver))
            .ok_or_else(|| Error::NoSchema {
                engine: engine.map(String::from),
                driver: driver.map(String::from),
            })
    }

    /// Build the target for a payload.
    ///
    /// # Arguments
    ///
    /// * `data` - Flat connection parameters, including `engine`
    /// * `catalog` - Optional catalog override
    /// * `namespace` - Optional namespace override
    pub fn get_target(
        data: &Map<String, Value>,
        catalog: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<EngineTarget> {
        Self::schema_for(data)?.get_target(data, catalog, namespace)
    }

    /// Build an engine for a payload with default pool settings.
    pub fn get_engine(
        data: &Map<String, Value>,
        catalog: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<BoxedEngine> {
        Self::get_engine_with(data, catalog, namespace, &PoolSettings::default())
    }

    /// Build an engine for a payload with explicit pool settings.
    pub fn get_engine_with(
        data: &Map<String, Value>,
        catalog: Option<&str>,
        namespace: Option<&str>,
        settings: &PoolSettings,
    ) -> Result<BoxedEngine> {
        let schema = Self::schema_for(data)?;
        let target = schema.get_target(data, catalog, namespace)?;
        schema.create_engine(target, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Vendor;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_find_schema() {
        let schema = find_schema("postgresql", Some("asyncpg")).unwrap();
        assert_eq!(schema.vendor(), Vendor::PostgreSQL);

        let schema = find_schema("mysql", None).unwrap();
        assert_eq!(schema.vendor(), Vendor::MySQL);

        assert!(find_schema("sqlite", Some("psycopg2")).is_none());
        assert!(find_schema("oracle", None).is_none());
    }

    #[test]
    fn test_get_target_dispatches_on_engine() {
        let data = payload(json!({"engine": "mysql", "host": "localhost", "database": "shop"}));
        let target = EngineFactory::get_target(&data, None, None).unwrap();

        assert_eq!(target.vendor, Vendor::MySQL);
        assert_eq!(target.url.backend_name(), "mysql");
        assert_eq!(target.url.database.as_deref(), Some("shop"));
    }

    #[test]
    fn test_missing_engine() {
        let err = EngineFactory::get_target(&payload(json!({"host": "localhost"})), None, None)
            .unwrap_err();
        assert!(matches!(err, Error::NoSchema { engine: None, driver: None }));
    }

    #[test]
    fn test_unknown_driver() {
        let data = payload(json!({"engine": "postgresql", "driver": "jdbc", "host": "x"}));
        let err = EngineFactory::get_target(&data, None, None).unwrap_err();

        let Error::NoSchema { engine, driver } = err else {
            panic!("expected NoSchema, got {err:?}");
        };
        assert_eq!(engine.as_deref(), Some("postgresql"));
        assert_eq!(driver.as_deref(), Some("jdbc"));
    }

    #[test]
    fn test_get_engine_builds_sqlite_engine() {
        let data = payload(json!({"engine": "sqlite"}));
        let engine = smol::block_on(async { EngineFactory::get_engine(&data, None, None) }).unwrap();

        assert_eq!(engine.vendor(), Vendor::SQLite);
        assert_eq!(engine.display_name(), "sqlite+pysqlite://");
    }
}
