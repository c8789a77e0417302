//! MySQL driver.

mod connection;
mod params;
mod schema;
mod types;

pub use connection::MySqlEngine;
pub use params::{MySqlDriver, MySqlSchema};
pub use types::MySqlOptionsConverter;
