//! CreditSea client implementation.

use crate::error::SdkError;
use creditsea_domain::{ReportId, StoredReport};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Form field the server reads the file from
const FILE_FIELD: &str = "xmlFile";

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    /// Server message
    pub message: String,
    /// Identifier of the stored report
    pub report_id: ReportId,
    /// The stored report
    pub data: StoredReport,
    /// Server-side processing time in milliseconds
    pub processing_time: u64,
}

/// Server health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "healthy" or "degraded"
    pub status: String,
    /// Number of stored reports, when the store could be read
    pub reports: Option<u64>,
}

impl HealthStatus {
    /// Whether the server reported itself healthy
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// CreditSea SDK client
#[derive(Debug, Clone)]
pub struct CreditSeaClient {
    base_url: String,
    http: reqwest::Client,
}

impl CreditSeaClient {
    /// Create a new client for the server at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Server base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload an XML report
    pub async fn upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadReceipt, SdkError> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("application/xml")?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;

        decode(response).await
    }

    /// List stored reports, newest first
    pub async fn list_reports(&self, limit: Option<usize>) -> Result<Vec<StoredReport>, SdkError> {
        let url = match limit {
            Some(limit) => self.url(&format!("/api/reports?limit={}", limit)),
            None => self.url("/api/reports"),
        };

        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// Fetch one report; `None` when the server has no such report
    pub async fn get_report(&self, id: ReportId) -> Result<Option<StoredReport>, SdkError> {
        let response = self
            .http
            .get(self.url(&format!("/api/reports/{}", id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        decode(response).await.map(Some)
    }

    /// Query server health
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        let response = self.http.get(self.url("/api/health")).send().await?;
        decode(response).await
    }
}

/// Decode a JSON body, turning error statuses into [`SdkError::Api`]
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SdkError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SdkError::from_response(status.as_u16(), &body));
    }

    Ok(serde_json::from_str(&body)?)
}
