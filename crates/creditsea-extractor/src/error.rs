//! Error types for document parsing and extraction

use thiserror::Error;

/// Errors that can occur while parsing raw XML into a document tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Input is empty or whitespace only
    #[error("XML document is empty")]
    Empty,

    /// Input exceeds the configured size limit
    #[error("XML document too large: {size} bytes (max: {max})")]
    TooLarge {
        /// Input size in bytes
        size: usize,
        /// Configured maximum
        max: usize,
    },

    /// Element nesting exceeds the configured depth limit
    #[error("XML nesting exceeds maximum depth of {max}")]
    TooDeep {
        /// Configured maximum
        max: usize,
    },

    /// No element found in the input
    #[error("XML document has no root element")]
    NoRootElement,

    /// A second top-level element follows the root
    #[error("XML document has more than one root element")]
    MultipleRootElements,

    /// Character data outside the root element
    #[error("XML document has text outside the root element")]
    TextOutsideRoot,

    /// Tokenizer or structural failure
    #[error("XML parsing failed: {reason} at byte {position}")]
    Malformed {
        /// Byte offset where the failure was detected
        position: usize,
        /// Description of the failure
        reason: String,
    },
}

/// Errors that make a parsed document unusable as a credit report
///
/// Only required sections produce errors. Missing or unparsable optional
/// fields are replaced by defaults and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The report root element is absent
    #[error("Missing root element: INProfileResponse")]
    MissingRootElement,

    /// A required section is absent
    #[error("Missing required section: {0}")]
    MissingRequiredSection(String),

    /// A required section is present but cannot be used
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

/// Errors from the parser configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A limit or flag combination is invalid
    #[error("Invalid parser configuration: {0}")]
    Invalid(String),

    /// TOML could not be parsed
    #[error("Failed to parse parser TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize parser TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
