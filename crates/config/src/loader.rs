//! Configuration loader implementation

use crate::schema::{Config, DatabaseConfig, ServerConfig, DEFAULT_ENV, DEFAULT_HOST, DEFAULT_PORT};
use crate::validation::{coerce_bool, ValidationReport};
use anyhow::{Context, Result};
use figment::{
    providers::Env,
    Figment,
};
use serde::Deserialize;

/// Environment variables recognized by the loader
const RECOGNIZED_VARS: &[&str] = &[
    "APP_ENV",
    "DB_CONNECTION_STRING",
    "DB_MIGRATING",
    "DB_SEEDING",
    "HTTP_HOST",
    "HTTP_PORT",
];

/// Raw, uncoerced environment values
///
/// Everything is an optional string at this stage; coercion and requiredness
/// are applied by `validate`, which aggregates every problem into one report.
#[derive(Debug, Default, Deserialize)]
struct RawEnv {
    app_env: Option<String>,
    db_connection_string: Option<String>,
    db_migrating: Option<String>,
    db_seeding: Option<String>,
    http_host: Option<String>,
    http_port: Option<String>,
}

/// Configuration loader that validates process environment variables
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment
    ///
    /// `.env` expansion happens earlier via `dotenv` at process start; this
    /// reads the merged environment. Any missing or malformed variable makes
    /// the whole load fail with an error listing every offending variable.
    pub fn load() -> Result<Config> {
        let figment = Figment::new().merge(Env::raw().only(RECOGNIZED_VARS));
        Self::load_from_figment(figment)
    }

    /// Load configuration from an explicit figment (for testing)
    pub fn load_from_figment(figment: Figment) -> Result<Config> {
        let raw: RawEnv = figment
            .extract()
            .context("Failed to read environment configuration")?;

        Self::validate(raw)
    }

    /// Coerce and validate raw values, aggregating every issue
    fn validate(raw: RawEnv) -> Result<Config> {
        let mut report = ValidationReport::new();

        let env = raw.app_env.unwrap_or_else(|| DEFAULT_ENV.to_string());

        let connection_string = match raw.db_connection_string {
            Some(value) if !value.trim().is_empty() => value,
            Some(_) => {
                report.add("DB_CONNECTION_STRING", "must not be empty");
                String::new()
            }
            None => {
                report.add("DB_CONNECTION_STRING", "missing required value");
                String::new()
            }
        };

        let migrating = Self::bool_flag(raw.db_migrating, "DB_MIGRATING", &mut report);
        let seeding = Self::bool_flag(raw.db_seeding, "DB_SEEDING", &mut report);

        let host = raw.http_host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match raw.http_port {
            Some(value) => match value.parse::<u16>() {
                Ok(0) => {
                    report.add("HTTP_PORT", "port cannot be 0");
                    DEFAULT_PORT
                }
                Ok(port) => port,
                Err(_) => {
                    report.add("HTTP_PORT", "not a valid port number");
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        if report.has_issues() {
            return Err(report.into_error().into());
        }

        Ok(Config {
            env,
            server: ServerConfig {
                host,
                port,
                ..ServerConfig::default()
            },
            database: DatabaseConfig {
                connection_string,
                migrating,
                seeding,
            },
        })
    }

    fn bool_flag(value: Option<String>, variable: &str, report: &mut ValidationReport) -> bool {
        match value {
            None => false,
            Some(raw) => match coerce_bool(&raw) {
                Some(flag) => flag,
                None => {
                    report.add(variable, "not a recognized boolean value");
                    false
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::Serialized;
    use serde_json::json;

    fn figment_from(value: serde_json::Value) -> Figment {
        Figment::from(Serialized::defaults(value))
    }

    #[test]
    fn loads_minimal_environment_with_defaults() {
        let config = ConfigLoader::load_from_figment(figment_from(json!({
            "db_connection_string": "sqlite:data/events.db",
        })))
        .unwrap();

        assert_eq!(config.env, "development");
        assert_eq!(config.database.connection_string, "sqlite:data/events.db");
        assert!(!config.database.migrating);
        assert!(!config.database.seeding);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn missing_connection_string_is_fatal_and_named() {
        let err = ConfigLoader::load_from_figment(figment_from(json!({
            "app_env": "production",
        })))
        .unwrap_err();

        assert!(err.to_string().contains("DB_CONNECTION_STRING"));
    }

    #[test]
    fn migrating_flag_is_type_coerced() {
        let config = ConfigLoader::load_from_figment(figment_from(json!({
            "db_connection_string": "sqlite::memory:",
            "db_migrating": "true",
            "db_seeding": "0",
        })))
        .unwrap();

        assert!(config.database.migrating);
        assert!(!config.database.seeding);
    }

    #[test]
    fn all_issues_are_aggregated_into_one_error() {
        let err = ConfigLoader::load_from_figment(figment_from(json!({
            "db_migrating": "maybe",
            "http_port": "eighty",
        })))
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("DB_CONNECTION_STRING"));
        assert!(message.contains("DB_MIGRATING"));
        assert!(message.contains("HTTP_PORT"));
        assert!(message.lines().count() >= 3);
    }

    #[test]
    fn overrides_take_effect() {
        let config = ConfigLoader::load_from_figment(figment_from(json!({
            "app_env": "staging",
            "db_connection_string": "sqlite:data/events.db",
            "http_host": "127.0.0.1",
            "http_port": "9000",
        })))
        .unwrap();

        assert_eq!(config.env, "staging");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }
}
