//! CreditSea Domain Layer
//!
//! This crate contains the normalized credit report model shared by every
//! other crate in the workspace. It holds no parsing, storage or transport
//! logic; those live in the infrastructure crates and meet here through the
//! trait definitions in [`traits`].
//!
//! ## Key Concepts
//!
//! - **NormalizedReport**: The flat, fully-defaulted record produced from a
//!   bureau document. Every numeric field is a non-negative integer.
//! - **StoredReport**: A normalized report after persistence, carrying the
//!   store-assigned identifier and creation time. Immutable once written.
//! - **AccountKind**: Derived classification of a credit account.
//! - **ScoreBand**: Coarse rating of a bureau score for presentation.
//!
//! ## Architecture
//!
//! - Minimal external dependencies (`uuid`, `serde`, `chrono`)
//! - Pure data and value logic only
//! - Trait definitions for the storage boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod id;
pub mod report;
pub mod score;
pub mod traits;

// Re-exports for convenience
pub use id::ReportId;
pub use report::{
    AccountKind, AccountRecord, BasicDetails, NormalizedReport, ReportSummary, StoredReport,
};
pub use score::ScoreBand;
pub use traits::{ReportQuery, ReportStore};
