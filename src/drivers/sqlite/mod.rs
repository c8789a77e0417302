//! SQLite driver.

mod connection;
mod params;
mod schema;

pub use connection::SqliteEngine;
pub use params::{MAIN_NAMESPACE, MEMORY_PATH, SqliteSchema};
