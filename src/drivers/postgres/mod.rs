//! PostgreSQL driver.

mod connection;
mod params;
mod schema;
mod types;

pub use connection::PostgresEngine;
pub use params::{PostgresDriver, PostgresSchema};
pub use types::PgOptionsConverter;
