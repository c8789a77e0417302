//! Error types.
//!
//! Validation problems are collected locally and reported all at once.
//! Failures from `sqlx` are never reinterpreted; they are wrapped only to
//! record which vendor and operation were being attempted.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::traits::Vendor;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by schema loading, target building and engine helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// The input parameters are missing or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The vendor has no concept for the requested hierarchy operation.
    #[error("{vendor} does not support {operation}")]
    UnsupportedOperation {
        vendor: Vendor,
        operation: &'static str,
    },

    /// No registered schema handles the requested engine and driver.
    #[error("No schema found for engine {engine:?} (driver {driver:?})")]
    NoSchema {
        engine: Option<String>,
        driver: Option<String>,
    },

    /// Pass-through failure from the database library.
    #[error("{vendor} {operation} failed")]
    Engine {
        vendor: Vendor,
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A statement tried to move the session away from its pinned namespace.
    #[error(
        "Queries modifying `search_path` are not allowed since a default namespace \
         ({namespace}) has been set. Please use fully qualified names or change the \
         default namespace for the connection."
    )]
    NamespaceChange { namespace: String },
}

impl Error {
    /// Wrap a `sqlx` error with the vendor and operation being attempted.
    pub fn engine(vendor: Vendor, operation: &'static str, source: sqlx::Error) -> Self {
        Self::Engine {
            vendor,
            operation,
            source,
        }
    }

    /// Shorthand for [`Error::UnsupportedOperation`].
    pub fn unsupported(vendor: Vendor, operation: &'static str) -> Self {
        Self::UnsupportedOperation { vendor, operation }
    }
}

/// Every offending field of a payload, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    messages: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Field names with at least one message, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.messages.contains_key(field)
    }

    /// Messages for a single field.
    pub fn messages_for(&self, field: &str) -> &[String] {
        self.messages
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `Ok(())` when nothing was recorded, `Err(self)` otherwise.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid connection parameters:")?;
        for (field, messages) in &self.messages {
            write!(f, " {}: {};", field, messages.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_collects_per_field() {
        let mut errors = ValidationError::new();
        assert!(errors.is_empty());

        errors.add("host", "Missing data for required field.");
        errors.add("port", "Not a valid integer.");
        errors.add("port", "Must be between 0 and 65535.");

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["host", "port"]);
        assert_eq!(errors.messages_for("port").len(), 2);
        assert!(errors.messages_for("driver").is_empty());
        assert!(errors.clone().into_result().is_err());
    }

    #[test]
    fn test_validation_error_display_names_fields() {
        let mut errors = ValidationError::new();
        errors.add("host", "Missing data for required field.");

        let message = Error::from(errors).to_string();
        assert!(message.contains("host: Missing data for required field."));
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = Error::unsupported(Vendor::SQLite, "catalogs");
        assert_eq!(err.to_string(), "SQLite does not support catalogs");
    }

    #[test]
    fn test_engine_error_keeps_source_separate() {
        let err = Error::engine(Vendor::PostgreSQL, "execute", sqlx::Error::PoolTimedOut);

        assert_eq!(err.to_string(), "PostgreSQL execute failed");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), sqlx::Error::PoolTimedOut.to_string());
    }
}
