//! MySQL connection schema.

use std::collections::BTreeMap;

use serde_json::Value;

use super::connection::MySqlEngine;
use crate::error::{Result, ValidationError};
use crate::traits::{
    BoxedEngine, EngineTarget, EngineUrl, FieldSpec, Params, PoolSettings,
    SslFlags, Vendor, VendorSchema,
};

/// Supported drivers for MySQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MySqlDriver {
    MySqlDb,
    PyMySql,
    MySqlConnector,
    AsyncMy,
    AioMySql,
}

const DRIVERS: &[&str] = &["mysqldb", "pymysql", "mysqlconnector", "asyncmy", "aiomysql"];

impl MySqlDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySqlDb => "mysqldb",
            Self::PyMySql => "pymysql",
            Self::MySqlConnector => "mysqlconnector",
            Self::AsyncMy => "asyncmy",
            Self::AioMySql => "aiomysql",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "mysqldb" => Some(Self::MySqlDb),
            "pymysql" => Some(Self::PyMySql),
            "mysqlconnector" => Some(Self::MySqlConnector),
            "asyncmy" => Some(Self::AsyncMy),
            "aiomysql" => Some(Self::AioMySql),
            _ => None,
        }
    }

    /// Whether the driver reads `ssl_mode` from the URL rather than an
    /// `ssl` connect argument.
    pub fn uses_ssl_mode_query(&self) -> bool {
        matches!(self, Self::MySqlDb | Self::MySqlConnector)
    }
}

static FIELDS: &[FieldSpec] = &[
    FieldSpec::engine("mysql"),
    FieldSpec::driver(DRIVERS),
    FieldSpec::catalog(),
    FieldSpec::namespace(),
    FieldSpec::string("username", "Username"),
    FieldSpec::string("password", "Password").secret(),
    FieldSpec::string("host", "Hostname or IP address").required(),
    FieldSpec::port(3306),
    FieldSpec::boolean("require_ssl", true, "Require SSL for the connection"),
    FieldSpec::boolean("disable_hostname_checking", false, "Disable hostname checking"),
    FieldSpec::boolean(
        "allow_self_signed_certificates",
        false,
        "Allow self-signed certificates",
    ),
];

/// MySQL schema.
///
/// MySQL has no catalogs; a MySQL database is the namespace and goes in the
/// URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlSchema;

impl VendorSchema for MySqlSchema {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn vendor(&self) -> Vendor {
        Vendor::MySQL
    }

    fn component_name(&self) -> &'static str {
        "MySqlSchema"
    }

    fn drivers(&self) -> &'static [&'static str] {
        DRIVERS
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[("database", "namespace")]
    }

    fn build_target(&self, params: &Params) -> Result<EngineTarget> {
        let driver_name = params.driver().unwrap_or(DRIVERS[0]);
        let driver = MySqlDriver::from_name(driver_name).ok_or_else(|| {
            let mut errors = ValidationError::new();
            errors.add("driver", format!("Must be one of: {}.", DRIVERS.join(", ")));
            errors
        })?;

        let flags = SslFlags::from_params(params);
        let mut query = BTreeMap::new();
        let mut connect_args = BTreeMap::new();

        if driver.uses_ssl_mode_query() {
            query.insert(
                "ssl_mode".to_string(),
                flags.ssl_mode().to_mysql_str().to_string(),
            );
        } else {
            let context = serde_json::to_value(flags.tls_context()).unwrap_or(Value::Null);
            connect_args.insert("ssl".to_string(), context);
        }

        let url = EngineUrl {
            drivername: format!("{}+{}", params.engine(), driver.as_str()),
            username: params.str("username").map(String::from),
            password: params.str("password").map(String::from),
            host: params.str("host").map(String::from),
            port: params.int("port").and_then(|port| u16::try_from(port).ok()),
            database: params.namespace().map(String::from),
            query,
        };

        let mut target = EngineTarget::new(Vendor::MySQL, url);
        target.connect_args = connect_args;
        Ok(target)
    }

    fn create_engine(&self, target: EngineTarget, settings: &PoolSettings) -> Result<BoxedEngine> {
        Ok(MySqlEngine::boxed(target, settings))
    }
}
