//! Configuration for the document parser

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for parsing raw XML into a document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum input size (bytes)
    pub max_document_bytes: usize,

    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Trim leading and trailing whitespace from element text
    pub trim_text: bool,

    /// Collapse runs of whitespace inside element text to a single space
    pub normalize_whitespace: bool,

    /// Represent every child as a sequence, even when it occurs once
    pub explicit_sequences: bool,
}

impl ParserConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_document_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_document_bytes must be greater than 0".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ParserConfig {
    /// Bureau documents are a few hundred KiB at most; 10 MiB leaves headroom
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
            max_depth: 64,
            trim_text: true,
            normalize_whitespace: true,
            explicit_sequences: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ParserConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = ParserConfig::default();
        config.max_document_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = ParserConfig::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ParserConfig::from_toml("explicit_sequences = true").unwrap();
        assert!(config.explicit_sequences);
        assert_eq!(config.max_depth, 64);
        assert!(config.trim_text);
    }

    #[test]
    fn test_toml_rejects_zero_depth() {
        assert!(ParserConfig::from_toml("max_depth = 0").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ParserConfig {
            max_depth: 12,
            normalize_whitespace: false,
            ..Default::default()
        };
        let parsed = ParserConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
