//! CreditSea Extractor
//!
//! Turns an uploaded bureau XML document into a [`NormalizedReport`].
//!
//! # Overview
//!
//! Extraction runs in two steps. The parser converts raw XML into a generic
//! [`XmlElement`] tree in which a tag that may repeat is held either as a
//! single node or as a sequence. The extractor then walks that tree along
//! fixed paths and fills in every field of the normalized record, replacing
//! absent or unparsable values with defaults.
//!
//! # Architecture
//!
//! ```text
//! XML text → parse_document → XmlElement → extract → NormalizedReport
//! ```
//!
//! Only required sections can fail extraction: a missing report root, a
//! missing applicant-details or account-summary section, or a required
//! section that occurs more than once. Optional fields never fail; the field
//! table in [`fields`] declares their defaults.
//!
//! Neither step logs or performs I/O, and both are safe to call from any
//! number of threads at once.
//!
//! # Example Usage
//!
//! ```
//! use creditsea_extractor::{extract, parse_document, ParserConfig};
//!
//! let xml = r#"<INProfileResponse>
//!   <Current_Application><Current_Application_Details><Current_Applicant_Details>
//!     <First_Name>Jane</First_Name><Last_Name>Doe</Last_Name>
//!   </Current_Applicant_Details></Current_Application_Details></Current_Application>
//!   <CAIS_Account><CAIS_Summary/></CAIS_Account>
//!   <SCORE><BureauScore>750</BureauScore></SCORE>
//! </INProfileResponse>"#;
//!
//! let document = parse_document(xml, &ParserConfig::default())?;
//! let report = extract(&document)?;
//!
//! assert_eq!(report.basic_details.name, "Jane Doe");
//! assert_eq!(report.basic_details.credit_score, 750);
//! assert!(report.credit_accounts.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`NormalizedReport`]: creditsea_domain::NormalizedReport

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
pub mod fields;
mod parser;
mod tree;


pub use config::ParserConfig;
pub use error::{ConfigError, DocumentError, ExtractionError};
pub use extractor::{extract, extract_at};
pub use parser::{parse_document, DocumentParser};
pub use tree::{XmlElement, XmlNode};
