//! Connection-parameter schemas and engine builders for SQL databases.
//!
//! Each supported vendor declares the fields it needs to connect and how its
//! native hierarchy (databases, schemas, attached files) maps onto two
//! standard levels:
//!
//! - **catalog**: the level above namespaces (a Postgres database)
//! - **namespace**: the level above tables (a Postgres schema, a MySQL database)
//!
//! A flat JSON payload is validated by the matching schema and turned into an
//! [`EngineTarget`](traits::EngineTarget) (a connection URL plus connect
//! arguments), optionally retargeted to another catalog or namespace. Targets
//! become lazily-connecting `sqlx` engines that can list their catalogs and
//! namespaces.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let data = json!({
//!     "engine": "postgresql",
//!     "driver": "psycopg2",
//!     "host": "localhost",
//!     "port": 5432,
//!     "database": "master",
//!     "ssl": false,
//! });
//! let target = enginator::get_target(data.as_object().unwrap(), Some("examples"), None).unwrap();
//! assert_eq!(
//!     target.connection_string(),
//!     "postgresql+psycopg2://localhost:5432/examples?sslmode=disable",
//! );
//! ```

pub mod drivers;
pub mod error;
pub mod settings;
pub mod spec;
pub mod traits;

use serde_json::{Map, Value};

pub use drivers::{EngineFactory, find_schema, schemas};
pub use error::{Error, Result, ValidationError};
pub use settings::get_settings;
pub use spec::build_spec;

use traits::{BoxedEngine, DatabaseEngine, EngineTarget, SchemaIntrospection};

/// Build the target for a payload, dispatching on its `engine` and `driver`.
pub fn get_target(
    data: &Map<String, Value>,
    catalog: Option<&str>,
    namespace: Option<&str>,
) -> Result<EngineTarget> {
    EngineFactory::get_target(data, catalog, namespace)
}

/// Build a lazily-connecting engine for a payload.
pub fn get_engine(
    data: &Map<String, Value>,
    catalog: Option<&str>,
    namespace: Option<&str>,
) -> Result<BoxedEngine> {
    EngineFactory::get_engine(data, catalog, namespace)
}

/// List the catalogs of an engine.
pub async fn get_catalogs(engine: &dyn DatabaseEngine) -> Result<Vec<String>> {
    engine.get_catalogs().await
}

/// List the namespaces of an engine.
pub async fn get_namespaces(engine: &dyn DatabaseEngine) -> Result<Vec<String>> {
    engine.get_namespaces().await
}
