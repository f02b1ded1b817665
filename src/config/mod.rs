//! Configuration loading
//!
//! The configuration is read from the environment exactly once at startup
//! (after loading a `.env` file when one exists) and then shared read-only,
//! by `Arc`, with the composer, the dispatcher and the server.
//!
//! # Environment variables
//!
//! - `SENDGRID_API_KEY`: mail provider credential (required)
//! - `SECRET_KEY`: signing key (optional, insecure development default)
//! - `DEBUG`: debug flag (optional, default: true)
//! - `DATABASE_URL`: order database, a `sqlite:` URL or `memory`
//!   (default: `sqlite://db.sqlite3?mode=rwc`)
//! - `DEFAULT_FROM_EMAIL`: sender of every notification
//! - `BUSINESS_EMAIL`: inbox receiving new-order and club alerts
//! - `MAIL_BACKEND`: `sendgrid` or `log`
//! - `MAIL_TIMEOUT_SECS`: bound on each mail transport call (default: 10)
//! - `APP_HOST` / `APP_PORT`: listen address (default: 0.0.0.0:8000)

use crate::core::error::ConfigError;
use crate::core::validation::validators::email;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SECRET_KEY: &str = "dev-not-secret-change-me";
pub const DEFAULT_SHOP_EMAIL: &str = "honeybeebake.mail@gmail.com";
pub const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://db.sqlite3?mode=rwc";
/// `DATABASE_URL` value that keeps orders in process memory
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Where accepted orders are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderDatabase {
    /// Process memory; orders are lost on restart
    Memory,
    /// A SQLite database, by `sqlite:` URL
    Sqlite(String),
}

impl FromStr for OrderDatabase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = s.trim();
        if url.eq_ignore_ascii_case(MEMORY_DATABASE_URL) {
            Ok(OrderDatabase::Memory)
        } else if url.starts_with("sqlite:") {
            Ok(OrderDatabase::Sqlite(url.to_string()))
        } else {
            Err(format!(
                "'{}' is neither a sqlite: URL nor '{}'",
                url, MEMORY_DATABASE_URL
            ))
        }
    }
}

impl Default for OrderDatabase {
    fn default() -> Self {
        OrderDatabase::Sqlite(DEFAULT_DATABASE_URL.to_string())
    }
}

/// Which mail transport the dispatcher talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailBackend {
    /// Write every message to the log instead of sending it
    Log,
    /// SendGrid v3 HTTP API
    SendGrid,
}

impl FromStr for MailBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "console" => Ok(MailBackend::Log),
            "sendgrid" => Ok(MailBackend::SendGrid),
            other => Err(format!("unknown mail backend '{}'", other)),
        }
    }
}

impl Default for MailBackend {
    fn default() -> Self {
        if cfg!(feature = "sendgrid") {
            MailBackend::SendGrid
        } else {
            MailBackend::Log
        }
    }
}

/// Application configuration
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub secret_key: String,
    pub debug: bool,
    pub database: OrderDatabase,
    pub sendgrid_api_key: String,
    /// Sender address of every outgoing message
    pub default_from_email: String,
    /// Internal inbox for new-order alerts; never shown to customers
    pub business_email: String,
    pub mail_backend: MailBackend,
    pub mail_timeout: Duration,
    pub app_host: String,
    pub app_port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let sendgrid_api_key = get("SENDGRID_API_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("SENDGRID_API_KEY".to_string()))?;

        let debug = match get("DEBUG") {
            Some(raw) => parse_bool("DEBUG", &raw)?,
            None => true,
        };

        let default_from_email =
            get("DEFAULT_FROM_EMAIL").unwrap_or_else(|| DEFAULT_SHOP_EMAIL.to_string());
        check_address("DEFAULT_FROM_EMAIL", &default_from_email)?;

        let business_email =
            get("BUSINESS_EMAIL").unwrap_or_else(|| DEFAULT_SHOP_EMAIL.to_string());
        check_address("BUSINESS_EMAIL", &business_email)?;

        let mail_backend = match get("MAIL_BACKEND") {
            Some(raw) => raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: "MAIL_BACKEND".to_string(),
                message,
            })?,
            None => MailBackend::default(),
        };

        let mail_timeout_secs: u64 = parse_or(
            "MAIL_TIMEOUT_SECS",
            get("MAIL_TIMEOUT_SECS"),
            DEFAULT_MAIL_TIMEOUT_SECS,
        )?;
        if mail_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAIL_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let database = match get("DATABASE_URL") {
            Some(raw) => raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: "DATABASE_URL".to_string(),
                message,
            })?,
            None => OrderDatabase::default(),
        };

        Ok(Self {
            secret_key: get("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            debug,
            database,
            sendgrid_api_key,
            default_from_email,
            business_email,
            mail_backend,
            mail_timeout: Duration::from_secs(mail_timeout_secs),
            app_host: get("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            app_port: parse_or("APP_PORT", get("APP_PORT"), DEFAULT_PORT)?,
        })
    }

    /// Configuration for tests and local tooling: log transport, in-memory store
    pub fn for_testing() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            debug: true,
            database: OrderDatabase::Memory,
            sendgrid_api_key: "test-key".to_string(),
            default_from_email: "hello@honeybee.test".to_string(),
            business_email: "kitchen@honeybee.test".to_string(),
            mail_backend: MailBackend::Log,
            mail_timeout: Duration::from_secs(DEFAULT_MAIL_TIMEOUT_SECS),
            app_host: "127.0.0.1".to_string(),
            app_port: 0,
        }
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }

    /// Whether the insecure development signing key is in use
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("secret_key", &"<redacted>")
            .field("debug", &self.debug)
            .field("database", &self.database)
            .field("sendgrid_api_key", &"<redacted>")
            .field("default_from_email", &self.default_from_email)
            .field("business_email", &self.business_email)
            .field("mail_backend", &self.mail_backend)
            .field("mail_timeout", &self.mail_timeout)
            .field("app_host", &self.app_host)
            .field("app_port", &self.app_port)
            .finish()
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{}' is not a boolean", raw),
        }),
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{}' is not a valid number", raw),
        }),
        None => Ok(default),
    }
}

fn check_address(key: &str, address: &str) -> Result<(), ConfigError> {
    email()(key, address).map_err(|message| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = AppConfig::from_lookup(lookup(&[("SENDGRID_API_KEY", "SG.key")])).unwrap();

        assert_eq!(config.sendgrid_api_key, "SG.key");
        assert!(config.debug);
        assert!(config.uses_default_secret());
        assert_eq!(
            config.database,
            OrderDatabase::Sqlite(DEFAULT_DATABASE_URL.to_string())
        );
        assert_eq!(config.default_from_email, DEFAULT_SHOP_EMAIL);
        assert_eq!(config.business_email, DEFAULT_SHOP_EMAIL);
        assert_eq!(config.mail_timeout, Duration::from_secs(10));
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("SENDGRID_API_KEY".to_string()));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup(&[("SENDGRID_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", "SG.key"),
            ("DEBUG", "False"),
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "sqlite://orders.db"),
            ("DEFAULT_FROM_EMAIL", "hello@honeybee.test"),
            ("BUSINESS_EMAIL", "kitchen@honeybee.test"),
            ("MAIL_BACKEND", "log"),
            ("MAIL_TIMEOUT_SECS", "3"),
            ("APP_PORT", "9000"),
        ]))
        .unwrap();

        assert!(!config.debug);
        assert!(!config.uses_default_secret());
        assert_eq!(
            config.database,
            OrderDatabase::Sqlite("sqlite://orders.db".to_string())
        );
        assert_eq!(config.business_email, "kitchen@honeybee.test");
        assert_eq!(config.mail_backend, MailBackend::Log);
        assert_eq!(config.mail_timeout, Duration::from_secs(3));
        assert_eq!(config.app_port, 9000);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            ("DEBUG", "maybe"),
            ("BUSINESS_EMAIL", "kitchen"),
            ("MAIL_BACKEND", "pigeon"),
            ("MAIL_TIMEOUT_SECS", "0"),
            ("APP_PORT", "eighty"),
            ("DATABASE_URL", "postgres://localhost/orders"),
        ];
        for (key, value) in cases {
            let vars = [("SENDGRID_API_KEY", "SG.key"), (key, value)];
            let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
            match err {
                ConfigError::InvalidValue { key: k, .. } => assert_eq!(k, key),
                other => panic!("unexpected error for {key}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_memory_database_is_explicit() {
        let vars = [("SENDGRID_API_KEY", "SG.key"), ("DATABASE_URL", "memory")];
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.database, OrderDatabase::Memory);

        let vars = [("SENDGRID_API_KEY", "SG.key"), ("DATABASE_URL", "sqlite::memory:")];
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.database, OrderDatabase::Sqlite("sqlite::memory:".to_string()));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config = AppConfig::for_testing();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("test-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
