//! CreditSea Storage Layer
//!
//! Implements the ReportStore trait on SQLite.
//!
//! # Architecture
//!
//! - One `reports` row per normalized report: basic details and summary
//! - One `credit_accounts` row per account, keyed by report and position so
//!   document order survives the round trip
//! - Reports are written inside a single transaction and never updated
//!
//! # Examples
//!
//! ```no_run
//! use creditsea_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for report operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use creditsea_domain::traits::{ReportQuery, ReportStore};
use creditsea_domain::{
    AccountKind, AccountRecord, BasicDetails, NormalizedReport, ReportId, ReportSummary,
    StoredReport,
};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Whether the database itself could not be reached or written
    ///
    /// Callers report these as a temporary condition, distinct from a report
    /// that cannot be represented.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Database(_))
    }
}

const REPORT_COLUMNS: &str = "id, name, mobile_phone, pan, credit_score, \
     total_accounts, active_accounts, closed_accounts, current_balance, \
     secured_accounts_amount, unsecured_accounts_amount, last_7_days_credit_enquiries, \
     report_date, created_at";

/// SQLite-based implementation of ReportStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store between threads
/// behind a mutex, or give each thread its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use creditsea_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("creditsea.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn bytes_to_report_id(bytes: &[u8]) -> Result<ReportId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!(
                "Expected 16 bytes for ReportId, got {}",
                bytes.len()
            ))
        })?;
        Ok(ReportId::from_bytes(arr))
    }

    fn account_kind_to_str(kind: AccountKind) -> &'static str {
        kind.as_str()
    }

    fn str_to_account_kind(s: &str) -> Result<AccountKind, StoreError> {
        match s {
            "Credit Card" => Ok(AccountKind::CreditCard),
            "Other" => Ok(AccountKind::Other),
            _ => Err(StoreError::InvalidData(format!("Unknown account kind: {}", s))),
        }
    }

    /// Load the accounts of one report in document order
    fn load_accounts(&self, id: ReportId) -> Result<Vec<AccountRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT credit_card, bank, address, account_number, amount_overdue, current_balance
             FROM credit_accounts WHERE report_id = ?1 ORDER BY position",
        )?;

        let accounts = stmt
            .query_map(params![&id.to_bytes()[..]], |row| {
                let kind: String = row.get(0)?;
                Ok(AccountRecord {
                    credit_card: Self::str_to_account_kind(&kind)
                        .map_err(|e| conversion_error(0, Type::Text, e))?,
                    bank: row.get(1)?,
                    address: row.get(2)?,
                    account_number: row.get(3)?,
                    amount_overdue: read_amount(row, 4)?,
                    current_balance: read_amount(row, 5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    /// Map a `reports` row selected with [`REPORT_COLUMNS`]; accounts are
    /// loaded separately
    fn read_report_row(row: &Row<'_>) -> rusqlite::Result<StoredReport> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_report_id(&id_bytes)
            .map_err(|e| conversion_error(0, Type::Blob, e))?;

        let credit_score = u32::try_from(row.get::<_, i64>(4)?).map_err(|_| {
            conversion_error(
                4,
                Type::Integer,
                StoreError::InvalidData("credit score out of range".to_string()),
            )
        })?;

        Ok(StoredReport {
            id,
            report: NormalizedReport {
                basic_details: BasicDetails {
                    name: row.get(1)?,
                    mobile_phone: row.get(2)?,
                    pan: row.get(3)?,
                    credit_score,
                },
                report_summary: ReportSummary {
                    total_accounts: read_amount(row, 5)?,
                    active_accounts: read_amount(row, 6)?,
                    closed_accounts: read_amount(row, 7)?,
                    current_balance: read_amount(row, 8)?,
                    secured_accounts_amount: read_amount(row, 9)?,
                    unsecured_accounts_amount: read_amount(row, 10)?,
                    last_7_days_credit_enquiries: read_amount(row, 11)?,
                },
                credit_accounts: Vec::new(),
                report_date: read_timestamp(row, 12)?,
            },
            created_at: read_timestamp(row, 13)?,
        })
    }
}

impl ReportStore for SqliteStore {
    type Error = StoreError;

    fn insert_report(&mut self, report: NormalizedReport) -> Result<StoredReport, Self::Error> {
        let id = ReportId::new();
        let created_at = truncate_to_millis(Utc::now())?;
        let report = NormalizedReport {
            report_date: truncate_to_millis(report.report_date)?,
            ..report
        };

        let id_bytes = id.to_bytes();
        let basic = &report.basic_details;
        let summary = &report.report_summary;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO reports (id, name, mobile_phone, pan, credit_score,
                total_accounts, active_accounts, closed_accounts, current_balance,
                secured_accounts_amount, unsecured_accounts_amount, last_7_days_credit_enquiries,
                report_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                &id_bytes[..],
                &basic.name,
                &basic.mobile_phone,
                &basic.pan,
                i64::from(basic.credit_score),
                to_column(summary.total_accounts, "total_accounts")?,
                to_column(summary.active_accounts, "active_accounts")?,
                to_column(summary.closed_accounts, "closed_accounts")?,
                to_column(summary.current_balance, "current_balance")?,
                to_column(summary.secured_accounts_amount, "secured_accounts_amount")?,
                to_column(summary.unsecured_accounts_amount, "unsecured_accounts_amount")?,
                to_column(summary.last_7_days_credit_enquiries, "last_7_days_credit_enquiries")?,
                report.report_date.timestamp_millis(),
                created_at.timestamp_millis(),
            ],
        )?;

        for (position, account) in report.credit_accounts.iter().enumerate() {
            tx.execute(
                "INSERT INTO credit_accounts (report_id, position, credit_card, bank, address,
                    account_number, amount_overdue, current_balance)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    &id_bytes[..],
                    position as i64,
                    Self::account_kind_to_str(account.credit_card),
                    &account.bank,
                    &account.address,
                    &account.account_number,
                    to_column(account.amount_overdue, "amount_overdue")?,
                    to_column(account.current_balance, "current_balance")?,
                ],
            )?;
        }
        tx.commit()?;

        Ok(StoredReport {
            id,
            report,
            created_at,
        })
    }

    fn get_report(&self, id: ReportId) -> Result<Option<StoredReport>, Self::Error> {
        let sql = format!("SELECT {} FROM reports WHERE id = ?1", REPORT_COLUMNS);
        let stored = self
            .conn
            .query_row(&sql, params![&id.to_bytes()[..]], Self::read_report_row)
            .optional()?;

        match stored {
            Some(mut stored) => {
                stored.report.credit_accounts = self.load_accounts(stored.id)?;
                Ok(Some(stored))
            }
            None => Ok(None),
        }
    }

    fn list_reports(&self, query: &ReportQuery) -> Result<Vec<StoredReport>, Self::Error> {
        let mut sql = format!(
            "SELECT {} FROM reports ORDER BY created_at DESC, seq DESC",
            REPORT_COLUMNS
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut reports = stmt
            .query_map(&param_refs[..], Self::read_report_row)?
            .collect::<Result<Vec<_>, _>>()?;

        for stored in &mut reports {
            stored.report.credit_accounts = self.load_accounts(stored.id)?;
        }

        Ok(reports)
    }

    fn count_reports(&self) -> Result<u64, Self::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("Negative report count: {}", count)))
    }
}

fn conversion_error(column: usize, ty: Type, e: StoreError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(e))
}

fn to_column(value: u64, field: &str) -> Result<i64, StoreError> {
    i64::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("{} out of range: {}", field, value)))
}

fn read_amount(row: &Row<'_>, column: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(column)?;
    u64::try_from(value).map_err(|_| {
        conversion_error(
            column,
            Type::Integer,
            StoreError::InvalidData(format!("Negative amount: {}", value)),
        )
    })
}

fn read_timestamp(row: &Row<'_>, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(column)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        conversion_error(
            column,
            Type::Integer,
            StoreError::InvalidData(format!("Timestamp out of range: {}", millis)),
        )
    })
}

/// Drop sub-millisecond precision so a stored timestamp reads back unchanged
fn truncate_to_millis(time: DateTime<Utc>) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_millis(time.timestamp_millis())
        .ok_or_else(|| StoreError::InvalidData(format!("Timestamp out of range: {}", time)))
}
