//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use creditsea_domain::{BasicDetails, NormalizedReport, ScoreBand, StoredReport};
use creditsea_sdk::UploadReceipt;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Placeholder for empty text fields and a missing score
const NOT_AVAILABLE: &str = "N/A";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a locally extracted report.
    ///
    /// Quiet output is the bare credit score.
    pub fn format_report(&self, report: &NormalizedReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.report_detail(report)),
            OutputFormat::Quiet => Ok(report.basic_details.credit_score.to_string()),
        }
    }

    /// Format one stored report.
    pub fn format_stored(&self, stored: &StoredReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stored)?),
            OutputFormat::Table => Ok(self.stored_detail(stored)),
            OutputFormat::Quiet => Ok(stored.id.to_string()),
        }
    }

    /// Format a list of stored reports.
    pub fn format_reports(&self, reports: &[StoredReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
            OutputFormat::Table => Ok(self.reports_table(reports)),
            OutputFormat::Quiet => {
                let ids: Vec<String> = reports.iter().map(|r| r.id.to_string()).collect();
                Ok(ids.join("\n"))
            }
        }
    }

    /// Format an upload result.
    pub fn format_upload(&self, receipt: &UploadReceipt) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(receipt)?),
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                self.success(&format!(
                    "Report stored: {} ({} ms)",
                    receipt.report_id, receipt.processing_time
                )),
                self.stored_detail(&receipt.data)
            )),
            OutputFormat::Quiet => Ok(receipt.report_id.to_string()),
        }
    }

    fn reports_table(&self, reports: &[StoredReport]) -> String {
        if reports.is_empty() {
            return self.colorize("No reports found.", Color::Yellow);
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Credit Score", "Accounts", "Created"]);

        for stored in reports {
            builder.push_record([
                stored.id.short(),
                stored.title(),
                self.score(&stored.report.basic_details),
                stored.report.report_summary.total_accounts.to_string(),
                format_timestamp(&stored.created_at),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn stored_detail(&self, stored: &StoredReport) -> String {
        format!(
            "{}\n{}\nID: {}\nStored: {}",
            self.heading(&stored.title()),
            self.report_detail(&stored.report),
            stored.id,
            format_timestamp(&stored.created_at)
        )
    }

    fn report_detail(&self, report: &NormalizedReport) -> String {
        let basic = &report.basic_details;
        let summary = &report.report_summary;

        let basic_table = key_value_table(vec![
            ("Name", or_na(&basic.name)),
            ("Mobile Phone", or_na(&basic.mobile_phone)),
            ("PAN", or_na(&basic.pan)),
            ("Credit Score", self.score(basic)),
        ]);

        let summary_table = key_value_table(vec![
            ("Total Accounts", summary.total_accounts.to_string()),
            ("Active Accounts", summary.active_accounts.to_string()),
            ("Closed Accounts", summary.closed_accounts.to_string()),
            ("Current Balance", format_rupees(summary.current_balance)),
            ("Secured Amount", format_rupees(summary.secured_accounts_amount)),
            ("Unsecured Amount", format_rupees(summary.unsecured_accounts_amount)),
            (
                "Enquiries (Last 7 Days)",
                summary.last_7_days_credit_enquiries.to_string(),
            ),
        ]);

        format!(
            "{}\n{}\n{}\n{}\n{}\n{}\nReport Date: {}",
            self.heading("Basic Details"),
            basic_table,
            self.heading("Report Summary"),
            summary_table,
            self.heading("Credit Accounts"),
            self.accounts_table(report),
            report.report_date.format("%B %-d, %Y")
        )
    }

    fn accounts_table(&self, report: &NormalizedReport) -> String {
        if report.credit_accounts.is_empty() {
            return self.colorize("No credit accounts.", Color::Yellow);
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Type",
            "Bank",
            "Address",
            "Account Number",
            "Amount Overdue",
            "Current Balance",
        ]);

        for account in &report.credit_accounts {
            let overdue = format_rupees(account.amount_overdue);
            builder.push_record([
                account.credit_card.to_string(),
                or_na(&account.bank),
                or_na(&account.address),
                or_na(&account.account_number),
                if account.is_overdue() {
                    self.colorize(&overdue, Color::Red)
                } else {
                    overdue
                },
                format_rupees(account.current_balance),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Score coloured by band; a zero score is shown as missing
    fn score(&self, details: &BasicDetails) -> String {
        if details.credit_score == 0 {
            return NOT_AVAILABLE.to_string();
        }

        let color = match details.score_band() {
            ScoreBand::Good => Color::Green,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        };
        self.colorize(&details.credit_score.to_string(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Render an amount in whole rupees with Indian digit grouping.
///
/// ```
/// use creditsea_cli::output::format_rupees;
///
/// assert_eq!(format_rupees(0), "₹0");
/// assert_eq!(format_rupees(1234567), "₹12,34,567");
/// ```
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

fn or_na(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text.to_string()
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y %H:%M UTC").to_string()
}

fn key_value_table(rows: Vec<(&str, String)>) -> String {
    let mut builder = Builder::default();
    for (label, value) in rows {
        builder.push_record([label.to_string(), value]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use creditsea_domain::{AccountKind, AccountRecord, ReportId, ReportSummary};

    fn create_test_report() -> NormalizedReport {
        NormalizedReport {
            basic_details: BasicDetails {
                name: "Jane Doe".to_string(),
                mobile_phone: "9876543210".to_string(),
                pan: String::new(),
                credit_score: 750,
            },
            report_summary: ReportSummary {
                total_accounts: 2,
                active_accounts: 1,
                closed_accounts: 1,
                current_balance: 1234567,
                secured_accounts_amount: 1000000,
                unsecured_accounts_amount: 234567,
                last_7_days_credit_enquiries: 0,
            },
            credit_accounts: vec![AccountRecord {
                credit_card: AccountKind::CreditCard,
                bank: "HDFC Bank".to_string(),
                address: String::new(),
                account_number: "XXXX1234".to_string(),
                amount_overdue: 500,
                current_balance: 20000,
            }],
            report_date: Utc.with_ymd_and_hms(2026, 3, 5, 10, 30, 0).unwrap(),
        }
    }

    fn details(credit_score: u32) -> BasicDetails {
        BasicDetails {
            credit_score,
            ..create_test_report().basic_details
        }
    }

    fn create_test_stored() -> StoredReport {
        StoredReport {
            id: ReportId::new(),
            report: create_test_report(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 5, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_rupee_grouping() {
        assert_eq!(format_rupees(0), "₹0");
        assert_eq!(format_rupees(999), "₹999");
        assert_eq!(format_rupees(1000), "₹1,000");
        assert_eq!(format_rupees(99999), "₹99,999");
        assert_eq!(format_rupees(100000), "₹1,00,000");
        assert_eq!(format_rupees(123456789), "₹12,34,56,789");
    }

    #[test]
    fn test_table_detail() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        assert!(output.contains("Basic Details"));
        assert!(output.contains("Jane Doe"));
        assert!(output.contains("750"));
        assert!(output.contains("₹12,34,567"));
        assert!(output.contains("HDFC Bank"));
        assert!(output.contains("Credit Card"));
        assert!(output.contains("March 5, 2026"));
    }

    #[test]
    fn test_empty_text_shown_as_na() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        // empty PAN and empty address
        assert_eq!(output.matches(NOT_AVAILABLE).count(), 2);
    }

    #[test]
    fn test_zero_score_shown_as_na() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.score(&details(0)), NOT_AVAILABLE);
        assert_eq!(formatter.score(&details(610)), "610");
    }

    #[test]
    fn test_colored_score_and_overdue() {
        colored::control::set_override(true);
        let formatter = Formatter::new(OutputFormat::Table, true);
        assert_eq!(formatter.score(&details(720)), "720".green().to_string());
        assert_eq!(formatter.score(&details(650)), "650".yellow().to_string());
        assert_eq!(formatter.score(&details(550)), "550".red().to_string());

        let output = formatter.format_report(&create_test_report()).unwrap();
        assert!(output.contains(&"₹500".red().to_string()));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_stored(&create_test_stored()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["basicDetails"]["name"], "Jane Doe");
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let reports = vec![create_test_stored(), create_test_stored()];
        let output = formatter.format_reports(&reports).unwrap();
        assert_eq!(
            output,
            format!("{}\n{}", reports[0].id, reports[1].id)
        );
        assert_eq!(
            formatter.format_report(&create_test_report()).unwrap(),
            "750"
        );
    }

    #[test]
    fn test_list_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let stored = create_test_stored();
        let output = formatter.format_reports(&[stored.clone()]).unwrap();
        assert!(output.contains("Credit Score"));
        assert!(output.contains(&stored.id.short()));
        assert!(output.contains("Mar 5, 2026 10:30 UTC"));
    }

    #[test]
    fn test_empty_list() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reports(&[]).unwrap();
        assert!(output.contains("No reports found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
