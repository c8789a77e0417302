//! Vendor abstraction traits and types.
//!
//! This module provides the contract every vendor implements:
//!
//! - **Types** (`types`): vendor enum, SSL settings, field declarations
//! - **Params** (`params`): validated parameter sets and the generic loader
//! - **Target** (`target`): connection URLs and connect arguments
//! - **Schema** (`schema`): the per-vendor schema trait
//! - **Engine** (`engine`): the engine and introspection traits, pool settings
//!
//! # Example
//!
//! ```ignore
//! use enginator::drivers::postgres::PostgresSchema;
//! use enginator::traits::VendorSchema;
//!
//! let data = serde_json::json!({"host": "localhost", "database": "master"});
//! let target = PostgresSchema
//!     .get_target(data.as_object().unwrap(), Some("examples"), None)?;
//! assert_eq!(target.url.database.as_deref(), Some("examples"));
//! ```

pub mod engine;
pub mod params;
pub mod schema;
pub mod target;
pub mod types;

pub use engine::{BoxedEngine, DatabaseEngine, PoolSettings, SchemaIntrospection};
pub use params::Params;
pub use schema::{Hierarchy, VendorSchema};
pub use target::{ConnectArgs, EngineTarget, EngineUrl, TlsContext};
pub use types::{FieldDefault, FieldKind, FieldSpec, SslFlags, SslMode, Vendor};
