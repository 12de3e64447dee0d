//! Error types for the CreditSea SDK.

use serde::Deserialize;
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// The server answered with an error status
    #[error("API error (HTTP {status}, {code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error code from the response body
        code: String,
        /// Error message, including details when the server sent them
        message: String,
    },

    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SdkError {
    /// Whether the server reported a temporary condition worth retrying later
    pub fn is_retryable(&self) -> bool {
        match self {
            SdkError::Api { status, .. } => *status == 503,
            SdkError::Connection(_) => true,
            SdkError::InvalidResponse(_) | SdkError::InvalidRequest(_) => false,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            SdkError::InvalidRequest(e.to_string())
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

/// Error body sent by the server
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: String,
    pub code: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl SdkError {
    /// Build an API error from a status and raw response body
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => SdkError::Api {
                status,
                code: parsed.code,
                message: match parsed.details {
                    Some(details) => format!("{} ({})", parsed.error, details),
                    None => parsed.error,
                },
            },
            Err(_) => SdkError::Api {
                status,
                code: "HTTP_ERROR".to_string(),
                message: if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                },
            },
        }
    }
}
