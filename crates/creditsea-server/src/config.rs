//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, database location, upload
//! limit, optional static UI directory and the `[parser]` table. A few
//! settings can be overridden from the environment.

use creditsea_extractor::ParserConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A value is present but unusable
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Field or variable name
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// The `[parser]` table is invalid
    #[error(transparent)]
    Parser(#[from] creditsea_extractor::ConfigError),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (default: 5000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// SQLite database file, or ":memory:"
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Largest accepted upload in bytes (default: 10 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Directory of static UI files served for unmatched paths
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Document parser settings
    #[serde(default)]
    pub parser: ParserConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    5000
}

fn default_database_path() -> String {
    "creditsea.db".to_string()
}

/// Default upload limit: 10 MiB
fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            database_path: default_database_path(),
            max_upload_bytes: default_max_upload_bytes(),
            static_dir: None,
            parser: ParserConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_upload_bytes".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        self.parser.validate()?;
        Ok(())
    }

    /// Apply `CREDITSEA_PORT` (or `PORT`) and `CREDITSEA_DATABASE` from the
    /// process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("CREDITSEA_PORT")
            .map(|value| ("CREDITSEA_PORT", value))
            .or_else(|| lookup("PORT").map(|value| ("PORT", value)));

        if let Some((name, value)) = port {
            self.bind_port = value.trim().parse().map_err(|_| ConfigError::Invalid {
                field: name.to_string(),
                reason: format!("'{}' is not a port number", value),
            })?;
        }

        if let Some(path) = lookup("CREDITSEA_DATABASE") {
            self.database_path = path;
        }

        self.validate()
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_port: 0,
            database_path: ":memory:".to_string(),
            ..Default::default()
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.database_path, "creditsea.db");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.static_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 8080
            database_path = "/var/lib/creditsea/reports.db"
            max_upload_bytes = 1048576
            static_dir = "client/dist"

            [parser]
            explicit_sequences = true
        "#;

        let config = ServerConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database_path, "/var/lib/creditsea/reports.db");
        assert_eq!(config.max_upload_bytes, 1_048_576);
        assert_eq!(config.static_dir, Some(PathBuf::from("client/dist")));
        assert!(config.parser.explicit_sequences);
        assert!(config.parser.trim_text);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.bind_port, 5000);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ServerConfig::from_toml("database_path = \"\""),
            Err(ConfigError::MissingField(field)) if field == "database_path"
        ));
        assert!(matches!(
            ServerConfig::from_toml("max_upload_bytes = 0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            ServerConfig::from_toml("[parser]\nmax_depth = 0"),
            Err(ConfigError::Parser(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config
            .apply_overrides(env(&[("PORT", "7000"), ("CREDITSEA_DATABASE", "/tmp/x.db")]))
            .unwrap();
        assert_eq!(config.bind_port, 7000);
        assert_eq!(config.database_path, "/tmp/x.db");

        config
            .apply_overrides(env(&[("PORT", "7000"), ("CREDITSEA_PORT", "7100")]))
            .unwrap();
        assert_eq!(config.bind_port, 7100);
    }

    #[test]
    fn test_env_override_rejects_bad_port() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_overrides(env(&[("CREDITSEA_PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("CREDITSEA_PORT"));
    }
}
