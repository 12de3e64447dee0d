//! Trait definitions for external interactions
//!
//! These traits define the boundary between the report model and
//! infrastructure. Implementations live in other crates.

use crate::{NormalizedReport, ReportId, StoredReport};

/// Trait for persisting and retrieving normalized reports
///
/// Implemented by the infrastructure layer (creditsea-store). Reports are
/// write-once: there is no update or delete operation.
pub trait ReportStore {
    /// Error type for store operations
    type Error;

    /// Persist a report, assigning its identifier and creation time
    fn insert_report(&mut self, report: NormalizedReport) -> Result<StoredReport, Self::Error>;

    /// Get a report by ID
    fn get_report(&self, id: ReportId) -> Result<Option<StoredReport>, Self::Error>;

    /// List reports, newest first
    ///
    /// Reports sharing a creation time are ordered by insertion, most
    /// recent first.
    fn list_reports(&self, query: &ReportQuery) -> Result<Vec<StoredReport>, Self::Error>;

    /// Number of stored reports
    fn count_reports(&self) -> Result<u64, Self::Error>;
}

/// Options for listing reports
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    /// Maximum results to return
    pub limit: Option<usize>,
}

impl ReportQuery {
    /// Query returning at most `limit` reports
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}
