//! MySQL connect-option mapping.

use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};

use crate::traits::{EngineTarget, SslMode};

/// Converter from engine targets to MySQL connect options.
pub struct MySqlOptionsConverter;

impl MySqlOptionsConverter {
    /// Map an `SslMode` to `MySqlSslMode`.
    pub fn map_ssl_mode(mode: SslMode) -> MySqlSslMode {
        match mode {
            SslMode::Disable => MySqlSslMode::Disabled,
            SslMode::Prefer => MySqlSslMode::Preferred,
            SslMode::Require => MySqlSslMode::Required,
            SslMode::VerifyCa => MySqlSslMode::VerifyCa,
            SslMode::VerifyFull => MySqlSslMode::VerifyIdentity,
        }
    }

    /// SSL mode encoded in the target, `Prefer` when the target says nothing.
    pub fn ssl_mode(target: &EngineTarget) -> SslMode {
        if let Some(mode) = target.url.query.get("ssl_mode") {
            return SslMode::from_mysql_str(mode).unwrap_or_default();
        }
        target
            .tls_context("ssl")
            .map(SslMode::from)
            .unwrap_or_default()
    }

    /// Build `MySqlConnectOptions` from the target URL.
    pub fn connect_options(target: &EngineTarget) -> MySqlConnectOptions {
        let url = &target.url;
        let mut options = MySqlConnectOptions::new()
            .host(url.host.as_deref().unwrap_or("localhost"))
            .ssl_mode(Self::map_ssl_mode(Self::ssl_mode(target)));

        if let Some(port) = url.port {
            options = options.port(port);
        }
        if let Some(username) = &url.username {
            options = options.username(username);
        }
        if let Some(password) = &url.password {
            options = options.password(password);
        }
        if let Some(database) = &url.database {
            options = options.database(database);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{EngineUrl, Vendor};
    use serde_json::Value;

    #[test]
    fn test_ssl_mode_mapping() {
        assert!(matches!(
            MySqlOptionsConverter::map_ssl_mode(SslMode::Disable),
            MySqlSslMode::Disabled
        ));
        assert!(matches!(
            MySqlOptionsConverter::map_ssl_mode(SslMode::VerifyFull),
            MySqlSslMode::VerifyIdentity
        ));
    }

    #[test]
    fn test_ssl_mode_from_target() {
        let url = EngineUrl::parse("mysql+mysqldb://localhost:3306/shop?ssl_mode=VERIFY_CA").unwrap();
        let target = EngineTarget::new(Vendor::MySQL, url);
        assert_eq!(MySqlOptionsConverter::ssl_mode(&target), SslMode::VerifyCa);

        let url = EngineUrl::parse("mysql+pymysql://localhost:3306/shop").unwrap();
        let mut target = EngineTarget::new(Vendor::MySQL, url);
        assert_eq!(MySqlOptionsConverter::ssl_mode(&target), SslMode::Prefer);

        target.connect_args.insert("ssl".to_string(), Value::Null);
        assert_eq!(MySqlOptionsConverter::ssl_mode(&target), SslMode::Disable);
    }
}
