//! CreditSea Rust SDK
//!
//! Async client for the CreditSea report API.
//!
//! # Example
//!
//! ```no_run
//! use creditsea_sdk::CreditSeaClient;
//!
//! # async fn example() -> Result<(), creditsea_sdk::SdkError> {
//! let client = CreditSeaClient::new("http://localhost:5000");
//!
//! let xml = std::fs::read("report.xml").expect("Failed to read file");
//! let receipt = client.upload("report.xml", xml).await?;
//! println!("Stored {} in {} ms", receipt.report_id, receipt.processing_time);
//!
//! for report in client.list_reports(Some(10)).await? {
//!     println!("{}: {}", report.id, report.title());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{CreditSeaClient, HealthStatus, UploadReceipt};
pub use error::SdkError;
