//! Vendor, SSL and field-declaration types.
//!
//! This module contains:
//! - `Vendor` - Enum of supported database vendors
//! - `SslMode` / `SslFlags` - SSL settings shared by the server-based vendors
//! - `FieldSpec` / `FieldKind` - Declarative connection-field definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::Params;
use super::target::TlsContext;

/// Supported database vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    PostgreSQL,
    MySQL,
    SQLite,
}

impl Vendor {
    /// Get the display name for this vendor
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PostgreSQL => "PostgreSQL",
            Self::MySQL => "MySQL",
            Self::SQLite => "SQLite",
        }
    }

    /// The `engine` value used in payloads and URL drivernames
    pub fn engine_name(&self) -> &'static str {
        match self {
            Self::PostgreSQL => "postgresql",
            Self::MySQL => "mysql",
            Self::SQLite => "sqlite",
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// SSL mode options (generic across vendors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    /// No SSL connection
    Disable,
    /// Try SSL first, fall back to non-SSL
    #[default]
    Prefer,
    /// Require SSL, don't verify certificates
    Require,
    /// Require SSL and verify server certificate
    VerifyCa,
    /// Require SSL, verify certificate and hostname
    VerifyFull,
}

impl SslMode {
    /// Parse from a libpq `sslmode` string
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "disable" => Some(Self::Disable),
            "prefer" => Some(Self::Prefer),
            "require" => Some(Self::Require),
            "verify-ca" => Some(Self::VerifyCa),
            "verify-full" => Some(Self::VerifyFull),
            _ => None,
        }
    }

    /// Convert to a libpq `sslmode` string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Prefer => "prefer",
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }

    /// Parse from a MySQL `ssl_mode` string
    pub fn from_mysql_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DISABLED" => Some(Self::Disable),
            "PREFERRED" => Some(Self::Prefer),
            "REQUIRED" => Some(Self::Require),
            "VERIFY_CA" => Some(Self::VerifyCa),
            "VERIFY_IDENTITY" => Some(Self::VerifyFull),
            _ => None,
        }
    }

    /// Convert to a MySQL `ssl_mode` string
    pub fn to_mysql_str(&self) -> &'static str {
        match self {
            Self::Disable => "DISABLED",
            Self::Prefer => "PREFERRED",
            Self::Require => "REQUIRED",
            Self::VerifyCa => "VERIFY_CA",
            Self::VerifyFull => "VERIFY_IDENTITY",
        }
    }
}

impl From<Option<TlsContext>> for SslMode {
    fn from(context: Option<TlsContext>) -> Self {
        match context {
            None => Self::Disable,
            Some(TlsContext {
                verify_certificate: false,
                ..
            }) => Self::Require,
            Some(TlsContext {
                check_hostname: false,
                ..
            }) => Self::VerifyCa,
            Some(_) => Self::VerifyFull,
        }
    }
}

/// The three SSL switches exposed by server-based schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SslFlags {
    pub require_ssl: bool,
    pub allow_self_signed_certificates: bool,
    pub disable_hostname_checking: bool,
}

impl SslFlags {
    pub fn from_params(params: &Params) -> Self {
        Self {
            require_ssl: params.flag("require_ssl"),
            allow_self_signed_certificates: params.flag("allow_self_signed_certificates"),
            disable_hostname_checking: params.flag("disable_hostname_checking"),
        }
    }

    /// Mode for drivers that take SSL settings as a URL query parameter.
    pub fn ssl_mode(&self) -> SslMode {
        if !self.require_ssl {
            return SslMode::Disable;
        }
        if self.allow_self_signed_certificates {
            return SslMode::Require;
        }
        if self.disable_hostname_checking {
            return SslMode::VerifyCa;
        }
        SslMode::VerifyFull
    }

    /// Context for drivers that take SSL settings as a connect argument.
    pub fn tls_context(&self) -> Option<TlsContext> {
        if !self.require_ssl {
            return None;
        }
        Some(TlsContext {
            check_hostname: !self.disable_hostname_checking,
            verify_certificate: !self.allow_self_signed_certificates,
        })
    }
}

/// How a field's raw value is checked and coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Inclusive range
    Integer { min: i64, max: i64 },
    Boolean,
    Enum(&'static [&'static str]),
    Constant(&'static str),
}

impl FieldKind {
    /// OpenAPI type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String | Self::Enum(_) | Self::Constant(_) => "string",
            Self::Integer { .. } => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// Check a raw value and coerce it to its canonical JSON form.
    pub fn coerce(&self, value: &Value) -> Result<Value, String> {
        match self {
            Self::String => value
                .as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(|| "Not a valid string.".to_string()),
            Self::Integer { min, max } => {
                let number = match value {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                }
                .ok_or_else(|| "Not a valid integer.".to_string())?;

                if number < *min || number > *max {
                    return Err(format!(
                        "Must be greater than or equal to {} and less than or equal to {}.",
                        min, max
                    ));
                }
                Ok(Value::from(number))
            }
            Self::Boolean => {
                let flag = match value {
                    Value::Bool(b) => Some(*b),
                    Value::Number(n) => match n.as_i64() {
                        Some(1) => Some(true),
                        Some(0) => Some(false),
                        _ => None,
                    },
                    Value::String(s) => match s.to_lowercase().as_str() {
                        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
                        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
                        _ => None,
                    },
                    _ => None,
                };
                flag.map(Value::Bool)
                    .ok_or_else(|| "Not a valid boolean.".to_string())
            }
            Self::Enum(choices) => match value.as_str() {
                Some(s) if choices.iter().any(|choice| *choice == s) => Ok(Value::String(s.to_string())),
                _ => Err(format!("Must be one of: {}.", choices.join(", "))),
            },
            Self::Constant(expected) => match value.as_str() {
                Some(s) if s == *expected => Ok(Value::String(s.to_string())),
                _ => Err(format!("Must be equal to {}.", expected)),
            },
        }
    }
}

/// Default applied when a field is absent from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Null,
    Str(&'static str),
    Int(i64),
    Bool(bool),
}

impl FieldDefault {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Str(s) => Value::String((*s).to_string()),
            Self::Int(i) => Value::from(*i),
            Self::Bool(b) => Value::Bool(*b),
        }
    }
}

/// Declaration of one connection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    pub default: Option<FieldDefault>,
    pub description: &'static str,
    /// Rendered as a password widget in generated forms
    pub secret: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: false,
            default: None,
            description,
            secret: false,
        }
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    pub const fn boolean(name: &'static str, default: bool, description: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean, description).with_default(FieldDefault::Bool(default))
    }

    pub const fn port(default: u16) -> Self {
        Self::new(
            "port",
            FieldKind::Integer {
                min: 0,
                max: u16::MAX as i64,
            },
            "Port number",
        )
        .with_default(FieldDefault::Int(default as i64))
    }

    /// The read-only `engine` field every schema carries.
    pub const fn engine(vendor_engine: &'static str) -> Self {
        Self::new("engine", FieldKind::Constant(vendor_engine), "Engine name")
            .with_default(FieldDefault::Str(vendor_engine))
    }

    /// The `driver` field; the first choice is the default.
    pub const fn driver(choices: &'static [&'static str]) -> Self {
        Self::new("driver", FieldKind::Enum(choices), "Database driver")
            .with_default(FieldDefault::Str(choices[0]))
    }

    pub const fn catalog() -> Self {
        Self::string(
            "catalog",
            "The catalog name, also often called a database (Postgres) or project (BigQuery).",
        )
        .nullable()
    }

    pub const fn namespace() -> Self {
        Self::string(
            "namespace",
            "The namespace name, also often called a schema (Postgres and most databases) or \
             database (MySQL).",
        )
        .nullable()
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self.default = Some(FieldDefault::Null);
        self
    }

    pub const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }
}
