//! Configuration module for minera.

use serde::Deserialize;
use std::path::Path;

use crate::{MineraError, Result};

/// API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means permissive (development mode).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Seed the demo users and role assignments on startup.
    #[serde(default)]
    pub seed_demo: bool,
}

fn default_db_path() -> String {
    "data/minera.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_demo: false,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign access and refresh tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_expiry")]
    pub access_token_expiry_secs: i64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_expiry")]
    pub refresh_token_expiry_days: i64,
}

fn default_jwt_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_access_expiry() -> i64 {
    86_400 // 1 day
}

fn default_refresh_expiry() -> i64 {
    7
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_expiry_secs: default_access_expiry(),
            refresh_token_expiry_days: default_refresh_expiry(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables file logging.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/minera.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// API server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| MineraError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.access_token_expiry_secs, 86_400);
        assert_eq!(config.auth.refresh_token_expiry_days, 7);
        assert!(!config.database.seed_demo);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
            [server]
            port = 8080

            [auth]
            jwt_secret = "s3cret"
            access_token_expiry_secs = 900
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.auth.access_token_expiry_secs, 900);
        // Untouched sections fall back to defaults
        assert_eq!(config.database.path, "data/minera.db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_cors_origins() {
        let toml = r#"
            [server]
            cors_origins = ["http://localhost:5173"]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.cors_origins.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("does/not/exist.toml");
        assert!(result.is_err());
    }
}
