//! Report module - the normalized credit report and its parts

use crate::id::ReportId;
use crate::score::ScoreBand;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bureau code identifying a credit card account
pub const CREDIT_CARD_TYPE_CODE: &str = "10";

/// Applicant identity and bureau score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDetails {
    /// First and last name joined by a single space
    pub name: String,

    /// Mobile phone number as written in the document
    pub mobile_phone: String,

    /// Income tax PAN
    pub pan: String,

    /// Bureau score, 0 when unavailable
    pub credit_score: u32,
}

impl BasicDetails {
    /// Presentation band of the bureau score
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.credit_score)
    }
}

/// Account totals and outstanding balances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Number of accounts on file
    pub total_accounts: u64,

    /// Number of active accounts
    pub active_accounts: u64,

    /// Number of closed accounts
    pub closed_accounts: u64,

    /// Outstanding balance across all accounts
    pub current_balance: u64,

    /// Outstanding balance on secured accounts
    pub secured_accounts_amount: u64,

    /// Outstanding balance on unsecured accounts
    pub unsecured_accounts_amount: u64,

    /// Credit enquiries in the last seven days
    #[serde(rename = "last7DaysCreditEnquiries")]
    pub last_7_days_credit_enquiries: u64,
}

/// Classification of a credit account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// Account type code `"10"`
    #[serde(rename = "Credit Card")]
    CreditCard,

    /// Any other (or missing) account type code
    Other,
}

impl AccountKind {
    /// Classify a raw account type code
    ///
    /// Only the exact code `"10"` is a credit card; anything else,
    /// including an absent code, is `Other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use creditsea_domain::AccountKind;
    ///
    /// assert_eq!(AccountKind::from_type_code(Some("10")), AccountKind::CreditCard);
    /// assert_eq!(AccountKind::from_type_code(Some("51")), AccountKind::Other);
    /// assert_eq!(AccountKind::from_type_code(None), AccountKind::Other);
    /// ```
    pub fn from_type_code(code: Option<&str>) -> Self {
        match code {
            Some(CREDIT_CARD_TYPE_CODE) => AccountKind::CreditCard,
            _ => AccountKind::Other,
        }
    }

    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::CreditCard => "Credit Card",
            AccountKind::Other => "Other",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One credit account from the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Derived account classification
    pub credit_card: AccountKind,

    /// Subscriber (lender) name
    pub bank: String,

    /// Holder address lines and city, space-joined and trimmed
    pub address: String,

    /// Account number
    pub account_number: String,

    /// Amount past due
    pub amount_overdue: u64,

    /// Current balance
    pub current_balance: u64,
}

impl AccountRecord {
    /// Whether any amount is past due
    pub fn is_overdue(&self) -> bool {
        self.amount_overdue > 0
    }
}

/// The normalized record produced from one bureau document
///
/// Every field is populated: optional document content has already been
/// replaced by its default (empty string or 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReport {
    /// Applicant identity and score
    pub basic_details: BasicDetails,

    /// Account totals and balances
    pub report_summary: ReportSummary,

    /// Accounts in document order
    pub credit_accounts: Vec<AccountRecord>,

    /// Extraction time
    pub report_date: DateTime<Utc>,
}

/// A normalized report after persistence
///
/// Stored reports are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    /// Store-assigned identifier
    pub id: ReportId,

    /// The persisted record
    #[serde(flatten)]
    pub report: NormalizedReport,

    /// Persistence time
    pub created_at: DateTime<Utc>,
}

impl StoredReport {
    /// Title for list views: the applicant name, or a short id when unnamed
    pub fn title(&self) -> String {
        let name = self.report.basic_details.name.trim();
        if name.is_empty() {
            format!("Report {}", self.id.short())
        } else {
            name.to_string()
        }
    }
}
