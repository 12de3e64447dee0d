//! Multipart upload extraction and validation

use crate::error::AppError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use creditsea_extractor::DocumentError;

/// Form field carrying the XML file
pub const FILE_FIELD: &str = "xmlFile";

/// Alternative field name accepted for the file
pub const FILE_FIELD_ALIAS: &str = "file";

/// Room for multipart boundaries and part headers on top of the file itself
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// A file received from an upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name
    pub file_name: String,
    /// Client-supplied content type
    pub content_type: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Whether the content type or file name marks the file as XML
    pub fn is_xml(&self) -> bool {
        self.content_type.to_ascii_lowercase().contains("xml")
            || self.file_name.to_ascii_lowercase().ends_with(".xml")
    }

    /// The file as UTF-8 text
    pub fn text(&self) -> Result<&str, AppError> {
        std::str::from_utf8(&self.data).map_err(|e| {
            AppError::InvalidXml(DocumentError::Malformed {
                position: e.valid_up_to(),
                reason: "file is not valid UTF-8".to_string(),
            })
        })
    }
}

/// Read the file field from a multipart form.
///
/// The first field named [`FILE_FIELD`] or [`FILE_FIELD_ALIAS`] is taken;
/// other fields are skipped.
pub async fn extract_upload(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<UploadedFile, AppError> {
    let read_error = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::FileTooLarge(max_upload_bytes)
        } else {
            AppError::NoFile(format!("Failed to read multipart: {}", e))
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let field_name = field.name().unwrap_or_default();
        if field_name != FILE_FIELD && field_name != FILE_FIELD_ALIAS {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(read_error)?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::NoFile(format!(
        "Expected a file in the '{}' field",
        FILE_FIELD
    )))
}

/// Check type, size and emptiness before any parsing
pub fn validate_upload(file: &UploadedFile, max_upload_bytes: usize) -> Result<(), AppError> {
    if !file.is_xml() {
        return Err(AppError::InvalidFileType(format!(
            "'{}' has content type '{}'",
            file.file_name, file.content_type
        )));
    }
    if file.data.len() > max_upload_bytes {
        return Err(AppError::FileTooLarge(max_upload_bytes));
    }
    if file.data.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::EmptyFile);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str, data: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: data.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_xml_by_content_type_or_name() {
        assert!(file("report.txt", "application/xml", "<a/>").is_xml());
        assert!(file("report.txt", "text/xml; charset=utf-8", "<a/>").is_xml());
        assert!(file("REPORT.XML", "application/octet-stream", "<a/>").is_xml());
        assert!(!file("report.json", "application/json", "{}").is_xml());
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let err = validate_upload(&file("a.pdf", "application/pdf", "x"), 100).unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn test_validate_rejects_blank() {
        let err = validate_upload(&file("a.xml", "text/xml", " \n\t "), 100).unwrap_err();
        assert_eq!(err.code(), "EMPTY_FILE");
        let err = validate_upload(&file("a.xml", "text/xml", ""), 100).unwrap_err();
        assert_eq!(err.code(), "EMPTY_FILE");
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let err = validate_upload(&file("a.xml", "text/xml", "<abc/>"), 3).unwrap_err();
        assert_eq!(err.code(), "FILE_TOO_LARGE");
    }

    #[test]
    fn test_text_rejects_invalid_utf8() {
        let upload = UploadedFile {
            file_name: "a.xml".to_string(),
            content_type: "text/xml".to_string(),
            data: vec![b'<', 0xff, b'>'],
        };
        assert_eq!(upload.text().unwrap_err().code(), "INVALID_XML");
    }
}
