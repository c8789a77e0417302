//! Core engine trait.
//!
//! An engine owns a lazily-connecting `sqlx` pool built from an
//! [`EngineTarget`]. The crate never inspects the pool beyond issuing the
//! introspection queries of the listing helpers.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::target::EngineTarget;
use super::types::Vendor;
use crate::error::Result;

/// Pool settings applied when an engine is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

impl PoolSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Hierarchy introspection for an engine.
#[async_trait]
pub trait SchemaIntrospection: Send + Sync {
    /// List the catalogs visible to the current credentials.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for vendors without catalogs, or an
    /// `Engine` error wrapping the database failure.
    async fn get_catalogs(&self) -> Result<Vec<String>>;

    /// List the namespaces visible to the current credentials.
    async fn get_namespaces(&self) -> Result<Vec<String>>;
}

/// Trait implemented by every vendor engine.
///
/// # Example
///
/// ```ignore
/// use enginator::traits::DatabaseEngine;
///
/// async fn example(engine: &dyn DatabaseEngine) -> enginator::Result<()> {
///     for namespace in engine.get_namespaces().await? {
///         println!("{namespace}");
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DatabaseEngine: SchemaIntrospection + std::fmt::Debug {
    /// Get the vendor for this engine
    fn vendor(&self) -> Vendor;

    /// Get the target the engine was built from
    fn target(&self) -> &EngineTarget;

    /// Execute a statement (or script) and return the number of affected rows.
    ///
    /// Engines pinned to a namespace refuse statements that move it.
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Close the pool, waiting for connections to be released.
    async fn close(&self);

    /// The rendered connection string, with the password masked.
    fn display_name(&self) -> String {
        self.target().url.to_masked_string()
    }
}

/// A boxed engine trait object.
pub type BoxedEngine = Box<dyn DatabaseEngine>;
