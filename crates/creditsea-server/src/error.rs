//! HTTP error responses.
//!
//! Every failure leaves the server as `{ error, code, details? }` with a
//! status that tells the client whether to fix the upload or retry later.

use axum::{
    extract::{multipart::MultipartRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use creditsea_extractor::{DocumentError, ExtractionError};
use creditsea_store::StoreError;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,

    /// Stable machine-readable code
    pub code: String,

    /// Underlying reason, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// No file field in the form, or the form could not be read
    NoFile(String),
    /// Neither the content type nor the file name indicate XML
    InvalidFileType(String),
    /// The uploaded file is blank
    EmptyFile,
    /// The upload exceeds the configured limit
    FileTooLarge(usize),
    /// The document could not be parsed
    InvalidXml(DocumentError),
    /// The document parsed but is not a usable report
    InvalidStructure(ExtractionError),
    /// The path segment is not a report id
    InvalidReportId(String),
    /// The query string could not be read
    InvalidQuery(String),
    /// No report with this id
    ReportNotFound(String),
    /// The store could not be reached or written
    Database(StoreError),
    /// Internal server error
    InternalError(String),
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoFile(_)
            | AppError::InvalidFileType(_)
            | AppError::EmptyFile
            | AppError::InvalidXml(_)
            | AppError::InvalidStructure(_)
            | AppError::InvalidReportId(_)
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ReportNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code for clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NoFile(_) => "NO_FILE",
            AppError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AppError::EmptyFile => "EMPTY_FILE",
            AppError::FileTooLarge(_) => "FILE_TOO_LARGE",
            AppError::InvalidXml(_) => "INVALID_XML",
            AppError::InvalidStructure(_) => "INVALID_XML_STRUCTURE",
            AppError::InvalidReportId(_) => "INVALID_REPORT_ID",
            AppError::InvalidQuery(_) => "INVALID_QUERY",
            AppError::ReportNotFound(_) => "REPORT_NOT_FOUND",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::NoFile(_) => "No file uploaded".to_string(),
            AppError::InvalidFileType(_) => "Only XML files are allowed".to_string(),
            AppError::EmptyFile => "XML file is empty".to_string(),
            AppError::FileTooLarge(max) => {
                format!("File exceeds the maximum upload size of {} bytes", max)
            }
            AppError::InvalidXml(_) => "Invalid XML file format".to_string(),
            AppError::InvalidStructure(ExtractionError::MissingRootElement) => {
                "Invalid XML structure - missing required elements".to_string()
            }
            AppError::InvalidStructure(_) => {
                "Invalid XML structure - report could not be extracted".to_string()
            }
            AppError::InvalidReportId(_) => "Invalid report id".to_string(),
            AppError::InvalidQuery(_) => "Invalid query parameters".to_string(),
            AppError::ReportNotFound(_) => "Report not found".to_string(),
            AppError::Database(_) => {
                "Database is temporarily unavailable, please try again later".to_string()
            }
            AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            AppError::NoFile(reason)
            | AppError::InvalidFileType(reason)
            | AppError::InvalidReportId(reason)
            | AppError::InvalidQuery(reason) => Some(reason.clone()),
            AppError::InvalidXml(e) => Some(e.to_string()),
            AppError::InvalidStructure(e) => Some(e.to_string()),
            AppError::Database(e) => Some(e.to_string()),
            AppError::InternalError(reason) => Some(reason.clone()),
            AppError::EmptyFile | AppError::FileTooLarge(_) | AppError::ReportNotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.message(),
            code: self.code().to_string(),
            details: self.details(),
        };

        if status.is_server_error() {
            error!(code = %body.code, details = ?body.details, "Request failed");
        } else {
            warn!(code = %body.code, details = ?body.details, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::Empty => AppError::EmptyFile,
            DocumentError::TooLarge { max, .. } => AppError::FileTooLarge(max),
            other => AppError::InvalidXml(other),
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::NoFile(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        AppError::InvalidStructure(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        if e.is_unavailable() {
            AppError::Database(e)
        } else {
            AppError::InternalError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_errors_map_to_upload_codes() {
        assert_eq!(AppError::from(DocumentError::Empty).code(), "EMPTY_FILE");
        assert_eq!(
            AppError::from(DocumentError::TooLarge { size: 20, max: 10 }).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::from(DocumentError::NoRootElement).code(),
            "INVALID_XML"
        );
    }

    #[test]
    fn test_extraction_errors_carry_reason() {
        let err = AppError::from(ExtractionError::MissingRequiredSection(
            "CAIS_Account/CAIS_Summary".to_string(),
        ));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_XML_STRUCTURE");
        assert_eq!(
            err.details().as_deref(),
            Some("Missing required section: CAIS_Account/CAIS_Summary")
        );
    }

    #[test]
    fn test_database_failure_is_unavailable() {
        let err = AppError::from(StoreError::Database(rusqlite::Error::InvalidQuery));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_unreadable_stored_data_is_internal() {
        let err = AppError::from(StoreError::InvalidData("bad id length".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.details().as_deref(), Some("Invalid data: bad id length"));
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let body = ErrorResponse {
            error: "Report not found".to_string(),
            code: "REPORT_NOT_FOUND".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("details").is_none());
    }
}
