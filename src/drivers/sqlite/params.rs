//! SQLite connection schema.

use std::collections::BTreeMap;

use super::connection::SqliteEngine;
use crate::error::{Result, ValidationError};
use crate::traits::{
    BoxedEngine, EngineTarget, EngineUrl, FieldDefault, FieldSpec, Params,
    PoolSettings, Vendor, VendorSchema,
};

const DRIVERS: &[&str] = &["pysqlite", "aiosqlite"];

/// Path that selects an in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// The only namespace a fresh SQLite connection has.
pub const MAIN_NAMESPACE: &str = "main";

static FIELDS: &[FieldSpec] = &[
    FieldSpec::engine("sqlite"),
    FieldSpec::driver(DRIVERS),
    FieldSpec::catalog(),
    FieldSpec::namespace(),
    FieldSpec::string("path", "Path to the database file, or :memory:")
        .with_default(FieldDefault::Str(MEMORY_PATH)),
    FieldSpec::boolean("read_only", false, "Open the database read-only"),
];

/// SQLite schema.
///
/// SQLite has no catalogs. Attached databases are namespaces, but a new
/// connection only ever has `main`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteSchema;

impl VendorSchema for SqliteSchema {
    fn name(&self) -> &'static str {
        "SQLite"
    }

    fn vendor(&self) -> Vendor {
        Vendor::SQLite
    }

    fn component_name(&self) -> &'static str {
        "SqliteSchema"
    }

    fn drivers(&self) -> &'static [&'static str] {
        DRIVERS
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[("schema", "namespace")]
    }

    fn validate(&self, params: &Params, errors: &mut ValidationError) {
        if params.namespace().is_some_and(|ns| ns != MAIN_NAMESPACE) {
            errors.add("namespace", format!("Must be equal to {MAIN_NAMESPACE}."));
        }
        if params.flag("read_only") && params.str("path").unwrap_or(MEMORY_PATH) == MEMORY_PATH {
            errors.add("read_only", "An in-memory database cannot be opened read-only.");
        }
    }

    fn build_target(&self, params: &Params) -> Result<EngineTarget> {
        let driver = params.driver().unwrap_or(DRIVERS[0]);
        let path = params.str("path").unwrap_or(MEMORY_PATH);
        let mut query = BTreeMap::new();
        if params.flag("read_only") {
            query.insert("mode".to_string(), "ro".to_string());
        }

        let url = EngineUrl {
            drivername: format!("{}+{}", params.engine(), driver),
            database: (path != MEMORY_PATH).then(|| path.to_string()),
            query,
            ..Default::default()
        };

        Ok(EngineTarget::new(Vendor::SQLite, url))
    }

    fn create_engine(&self, target: EngineTarget, settings: &PoolSettings) -> Result<BoxedEngine> {
        SqliteEngine::boxed(target, settings)
    }
}
