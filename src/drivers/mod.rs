//! Vendor driver implementations.
//!
//! This module contains the schema and engine for each supported vendor:
//!
//! - **PostgreSQL**: database catalogs, schema namespaces pinned with `SET search_path`
//! - **MySQL**: no catalogs, database namespaces in the URL
//! - **SQLite**: no catalogs, only the `main` namespace
//!
//! Each driver implements `VendorSchema`, `DatabaseEngine` and
//! `SchemaIntrospection`.

mod factory;

pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use factory::{EngineFactory, find_schema, schemas};
