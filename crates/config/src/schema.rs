//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Main configuration structure
///
/// Built once at startup by [`crate::ConfigLoader`] and immutable for the
/// remainder of the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Execution mode label (development, staging, production)
    pub env: String,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection string
    pub connection_string: String,
    /// Whether the process is running in migration mode
    pub migrating: bool,
    /// Whether the process is running in seed mode
    pub seeding: bool,
}

/// Default execution mode when APP_ENV is absent
pub const DEFAULT_ENV: &str = "development";

/// Default HTTP bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP bind port
pub const DEFAULT_PORT: u16 = 8080;

impl Config {
    /// Whether the process runs in development mode
    pub fn is_development(&self) -> bool {
        self.env == DEFAULT_ENV
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_enabled: true,
        }
    }
}
