//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SDK error
    #[error("{0}")]
    Sdk(#[from] creditsea_sdk::SdkError),

    /// The file is not well-formed XML
    #[error("Invalid XML: {0}")]
    Document(#[from] creditsea_extractor::DocumentError),

    /// The document lacks required report structure
    #[error("Invalid report: {0}")]
    Extraction(#[from] creditsea_extractor::ExtractionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No report with the given id
    #[error("Report not found: {0}")]
    NotFound(String),
}
