//! Mapping from a parsed bureau document to a normalized report

use crate::error::ExtractionError;
use crate::fields;
use crate::tree::{XmlElement, XmlNode};
use chrono::{DateTime, Utc};
use creditsea_domain::{
    AccountKind, AccountRecord, BasicDetails, NormalizedReport, ReportSummary,
};

/// Extract a normalized report, stamped with the current time
///
/// `document` is the node returned by the parser: the report root is one of
/// its children.
pub fn extract(document: &XmlElement) -> Result<NormalizedReport, ExtractionError> {
    extract_at(document, Utc::now())
}

/// Extract a normalized report with an explicit report date
///
/// Output depends only on `document` and `report_date`.
pub fn extract_at(
    document: &XmlElement,
    report_date: DateTime<Utc>,
) -> Result<NormalizedReport, ExtractionError> {
    let root = match sole(document.node(fields::ROOT_ELEMENT)) {
        Occurrence::Absent => return Err(ExtractionError::MissingRootElement),
        Occurrence::Repeated(count) => {
            return Err(repeated(&[fields::ROOT_ELEMENT], count));
        }
        Occurrence::Single(root) => root,
    };

    let applicant = required_section(root, fields::APPLICANT_SECTION)?;
    let summary = required_section(root, fields::SUMMARY_SECTION)?;
    let accounts = root.all_at(fields::ACCOUNTS);

    Ok(NormalizedReport {
        basic_details: basic_details(root, applicant, accounts),
        report_summary: report_summary(root, summary),
        credit_accounts: accounts.iter().map(account_record).collect(),
        report_date,
    })
}

fn basic_details(
    root: &XmlElement,
    applicant: &XmlElement,
    accounts: &[XmlElement],
) -> BasicDetails {
    let name = format!(
        "{} {}",
        fields::FIRST_NAME.read(applicant),
        fields::LAST_NAME.read(applicant)
    );

    // An empty applicant PAN falls back the same as a missing one
    let pan = fields::APPLICANT_PAN
        .get(applicant)
        .filter(|pan| !pan.is_empty())
        .or_else(|| accounts.first().map(|account| fields::HOLDER_PAN.read(account)))
        .unwrap_or_default();

    let credit_score = u32::try_from(fields::BUREAU_SCORE.read(root)).unwrap_or(u32::MAX);

    BasicDetails {
        name,
        mobile_phone: fields::MOBILE_PHONE.read(applicant).to_string(),
        pan: pan.to_string(),
        credit_score,
    }
}

fn report_summary(root: &XmlElement, summary: &XmlElement) -> ReportSummary {
    ReportSummary {
        total_accounts: fields::TOTAL_ACCOUNTS.read(summary),
        active_accounts: fields::ACTIVE_ACCOUNTS.read(summary),
        closed_accounts: fields::CLOSED_ACCOUNTS.read(summary),
        current_balance: fields::BALANCE_ALL.read(summary),
        secured_accounts_amount: fields::BALANCE_SECURED.read(summary),
        unsecured_accounts_amount: fields::BALANCE_UNSECURED.read(summary),
        last_7_days_credit_enquiries: fields::ENQUIRIES_LAST_7_DAYS.read(root),
    }
}

fn account_record(account: &XmlElement) -> AccountRecord {
    let address = format!(
        "{} {} {}",
        fields::ADDRESS_LINE_1.read(account),
        fields::ADDRESS_LINE_2.read(account),
        fields::ADDRESS_CITY.read(account)
    );

    AccountRecord {
        credit_card: AccountKind::from_type_code(fields::ACCOUNT_TYPE.get(account)),
        bank: fields::SUBSCRIBER_NAME.read(account).to_string(),
        address: address.trim().to_string(),
        account_number: fields::ACCOUNT_NUMBER.read(account).to_string(),
        amount_overdue: fields::AMOUNT_PAST_DUE.read(account),
        current_balance: fields::CURRENT_BALANCE.read(account),
    }
}

/// How often a tag occurs under its parent
enum Occurrence<'a> {
    Absent,
    Single(&'a XmlElement),
    Repeated(usize),
}

fn sole(node: Option<&XmlNode>) -> Occurrence<'_> {
    match node.map(XmlNode::as_slice) {
        None | Some([]) => Occurrence::Absent,
        Some([element]) => Occurrence::Single(element),
        Some(elements) => Occurrence::Repeated(elements.len()),
    }
}

/// Walk a required section path, each step occurring exactly once
fn required_section<'a>(
    root: &'a XmlElement,
    path: &[&str],
) -> Result<&'a XmlElement, ExtractionError> {
    path.iter().try_fold(root, |element, tag| match sole(element.node(tag)) {
        Occurrence::Single(child) => Ok(child),
        Occurrence::Absent => Err(ExtractionError::MissingRequiredSection(path.join("/"))),
        Occurrence::Repeated(count) => Err(repeated(path, count)),
    })
}

fn repeated(path: &[&str], count: usize) -> ExtractionError {
    ExtractionError::ExtractionFailed(format!(
        "section {} occurs {} times, expected once",
        path.join("/"),
        count
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn leaf(text: &str) -> XmlNode {
        XmlNode::One(XmlElement::with_text(text))
    }

    fn one(element: XmlElement) -> XmlNode {
        XmlNode::One(element)
    }

    fn applicant(first: Option<&str>, last: Option<&str>) -> XmlElement {
        let mut details = XmlElement::default();
        if let Some(first) = first {
            details = details.with_child("First_Name", leaf(first));
        }
        if let Some(last) = last {
            details = details.with_child("Last_Name", leaf(last));
        }
        details = details.with_child("MobilePhoneNumber", leaf("9876543210"));

        XmlElement::default().with_child(
            "Current_Application_Details",
            one(XmlElement::default().with_child("Current_Applicant_Details", one(details))),
        )
    }

    fn summary(total: &str, active: &str, closed: &str) -> XmlElement {
        let credit = XmlElement::default()
            .with_child("CreditAccountTotal", leaf(total))
            .with_child("CreditAccountActive", leaf(active))
            .with_child("CreditAccountClosed", leaf(closed));
        XmlElement::default().with_child("Credit_Account", one(credit))
    }

    fn report(root: XmlElement) -> XmlElement {
        XmlElement::default().with_child("INProfileResponse", one(root))
    }

    fn minimal_root(cais: XmlElement) -> XmlElement {
        XmlElement::default()
            .with_child("Current_Application", one(applicant(Some("Jane"), Some("Doe"))))
            .with_child("CAIS_Account", one(cais))
    }

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_root() {
        let doc = XmlElement::default().with_child("Other", leaf(""));
        assert_eq!(
            extract_at(&doc, date()),
            Err(ExtractionError::MissingRootElement)
        );
    }

    #[test]
    fn test_empty_root_sequence_is_missing() {
        let doc = XmlElement::default().with_child("INProfileResponse", XmlNode::Many(vec![]));
        assert_eq!(
            extract_at(&doc, date()),
            Err(ExtractionError::MissingRootElement)
        );
    }

    #[test]
    fn test_missing_summary_names_section() {
        let root = XmlElement::default()
            .with_child("Current_Application", one(applicant(Some("Jane"), Some("Doe"))))
            .with_child("CAIS_Account", one(XmlElement::default()));

        assert_eq!(
            extract_at(&report(root), date()),
            Err(ExtractionError::MissingRequiredSection(
                "CAIS_Account/CAIS_Summary".to_string()
            ))
        );
    }

    #[test]
    fn test_missing_applicant_names_section() {
        let root = XmlElement::default().with_child(
            "CAIS_Account",
            one(XmlElement::default().with_child("CAIS_Summary", one(summary("1", "1", "0")))),
        );

        assert_eq!(
            extract_at(&report(root), date()),
            Err(ExtractionError::MissingRequiredSection(
                "Current_Application/Current_Application_Details/Current_Applicant_Details"
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_repeated_required_section_fails() {
        let cais = XmlElement::default().with_child(
            "CAIS_Summary",
            XmlNode::Many(vec![summary("1", "1", "0"), summary("2", "2", "0")]),
        );

        match extract_at(&report(minimal_root(cais)), date()) {
            Err(ExtractionError::ExtractionFailed(reason)) => {
                assert!(reason.contains("CAIS_Account/CAIS_Summary"));
                assert!(reason.contains("2 times"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_minimal_report() {
        let cais = XmlElement::default().with_child("CAIS_Summary", one(summary("5", "3", "2")));
        let result = extract_at(&report(minimal_root(cais)), date()).unwrap();

        assert_eq!(result.basic_details.name, "Jane Doe");
        assert_eq!(result.basic_details.mobile_phone, "9876543210");
        assert_eq!(result.basic_details.pan, "");
        assert_eq!(result.basic_details.credit_score, 0);
        assert_eq!(result.report_summary.total_accounts, 5);
        assert_eq!(result.report_summary.active_accounts, 3);
        assert_eq!(result.report_summary.closed_accounts, 2);
        assert_eq!(result.report_summary.current_balance, 0);
        assert_eq!(result.report_summary.last_7_days_credit_enquiries, 0);
        assert!(result.credit_accounts.is_empty());
        assert_eq!(result.report_date, date());
    }

    #[test]
    fn test_name_keeps_separator_when_part_missing() {
        let cais = XmlElement::default().with_child("CAIS_Summary", one(summary("0", "0", "0")));
        let root = XmlElement::default()
            .with_child("Current_Application", one(applicant(None, Some("Doe"))))
            .with_child("CAIS_Account", one(cais));

        let result = extract_at(&report(root), date()).unwrap();
        assert_eq!(result.basic_details.name, " Doe");
    }

    #[test]
    fn test_pan_falls_back_to_first_account_holder() {
        let holder = |pan: &str| {
            let details = XmlElement::default().with_child("Income_TAX_PAN", leaf(pan));
            XmlElement::default().with_child("CAIS_Holder_Details", one(details))
        };
        let cais = XmlElement::default()
            .with_child("CAIS_Summary", one(summary("2", "2", "0")))
            .with_child(
                "CAIS_Account_DETAILS",
                XmlNode::Many(vec![holder("FIRST1234A"), holder("SECOND123B")]),
            );

        let result = extract_at(&report(minimal_root(cais)), date()).unwrap();
        assert_eq!(result.basic_details.pan, "FIRST1234A");
        assert_eq!(result.credit_accounts.len(), 2);
    }

    #[test]
    fn test_account_address_is_trimmed_join() {
        let address = XmlElement::default()
            .with_child("First_Line_Of_Address_non_normalized", leaf("12 MG Road"))
            .with_child("City_non_normalized", leaf("Pune"));
        let account = XmlElement::default()
            .with_child("Account_Type", leaf("10"))
            .with_child("CAIS_Holder_Address_Details", one(address));
        let cais = XmlElement::default()
            .with_child("CAIS_Summary", one(summary("1", "1", "0")))
            .with_child("CAIS_Account_DETAILS", one(account));

        let result = extract_at(&report(minimal_root(cais)), date()).unwrap();
        let account = &result.credit_accounts[0];
        assert_eq!(account.address, "12 MG Road  Pune");
        assert_eq!(account.credit_card, AccountKind::CreditCard);
        assert_eq!(account.bank, "");
        assert_eq!(account.amount_overdue, 0);
    }

    #[test]
    fn test_score_saturates_at_u32() {
        let cais = XmlElement::default().with_child("CAIS_Summary", one(summary("0", "0", "0")));
        let root = minimal_root(cais).with_child(
            "SCORE",
            one(XmlElement::default().with_child("BureauScore", leaf("99999999999"))),
        );

        let result = extract_at(&report(root), date()).unwrap();
        assert_eq!(result.basic_details.credit_score, u32::MAX);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let cais = XmlElement::default().with_child("CAIS_Summary", one(summary("5", "3", "2")));
        let doc = report(minimal_root(cais));
        let before = doc.clone();

        let first = extract_at(&doc, date()).unwrap();
        let second = extract_at(&doc, date()).unwrap();
        assert_eq!(doc, before);
        assert_eq!(first, second);
    }
}
