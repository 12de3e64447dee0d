//! Field table for the bureau report schema
//!
//! Every location the extractor reads is declared here once, together with
//! its default. Text fields default to the empty string and integer fields
//! to 0; a field that is absent or unparsable is never an error.

use crate::tree::XmlElement;

/// Default for an absent text field
pub const TEXT_DEFAULT: &str = "";

/// Default for an absent or unparsable integer field
pub const INTEGER_DEFAULT: u64 = 0;

/// Largest integer a field can hold; fits a signed 64-bit column
pub const INTEGER_MAX: u64 = i64::MAX as u64;

/// A text field at a fixed path below its section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField {
    path: &'static [&'static str],
}

impl TextField {
    /// Declare a text field
    pub const fn new(path: &'static [&'static str]) -> Self {
        Self { path }
    }

    /// Text of the first occurrence, or `None` when absent
    pub fn get<'a>(&self, section: &'a XmlElement) -> Option<&'a str> {
        section.text_at(self.path)
    }

    /// Text of the first occurrence, or the default
    pub fn read<'a>(&self, section: &'a XmlElement) -> &'a str {
        self.get(section).unwrap_or(TEXT_DEFAULT)
    }
}

/// A non-negative integer field at a fixed path below its section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerField {
    path: &'static [&'static str],
}

impl IntegerField {
    /// Declare an integer field
    pub const fn new(path: &'static [&'static str]) -> Self {
        Self { path }
    }

    /// Parsed value of the first occurrence, or the default
    pub fn read(&self, section: &XmlElement) -> u64 {
        section
            .text_at(self.path)
            .map(parse_integer)
            .unwrap_or(INTEGER_DEFAULT)
    }
}

/// Parse the leading decimal digits of a field value
///
/// Surrounding whitespace and a leading `+` are accepted. Anything after the
/// first non-digit is ignored, so `"1234.56"` reads as 1234. Input without
/// leading digits, including negative numbers, reads as 0. Values saturate
/// at [`INTEGER_MAX`].
///
/// # Examples
///
/// ```
/// use creditsea_extractor::fields::parse_integer;
///
/// assert_eq!(parse_integer(" 750 "), 750);
/// assert_eq!(parse_integer("12abc"), 12);
/// assert_eq!(parse_integer("-5"), 0);
/// assert_eq!(parse_integer("n/a"), 0);
/// ```
pub fn parse_integer(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(INTEGER_DEFAULT, |value, digit| {
            value
                .saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
        .min(INTEGER_MAX)
}

/// Report root element
pub const ROOT_ELEMENT: &str = "INProfileResponse";

/// Applicant details section (required)
pub const APPLICANT_SECTION: &[&str] = &[
    "Current_Application",
    "Current_Application_Details",
    "Current_Applicant_Details",
];

/// Applicant first name
pub const FIRST_NAME: TextField = TextField::new(&["First_Name"]);
/// Applicant last name
pub const LAST_NAME: TextField = TextField::new(&["Last_Name"]);
/// Applicant mobile phone
pub const MOBILE_PHONE: TextField = TextField::new(&["MobilePhoneNumber"]);
/// Applicant income tax PAN
pub const APPLICANT_PAN: TextField = TextField::new(&["IncomeTaxPan"]);

/// Account summary section (required)
pub const SUMMARY_SECTION: &[&str] = &["CAIS_Account", "CAIS_Summary"];

/// Accounts on file
pub const TOTAL_ACCOUNTS: IntegerField =
    IntegerField::new(&["Credit_Account", "CreditAccountTotal"]);
/// Active accounts
pub const ACTIVE_ACCOUNTS: IntegerField =
    IntegerField::new(&["Credit_Account", "CreditAccountActive"]);
/// Closed accounts
pub const CLOSED_ACCOUNTS: IntegerField =
    IntegerField::new(&["Credit_Account", "CreditAccountClosed"]);
/// Outstanding balance, all accounts
pub const BALANCE_ALL: IntegerField =
    IntegerField::new(&["Total_Outstanding_Balance", "Outstanding_Balance_All"]);
/// Outstanding balance, secured accounts
pub const BALANCE_SECURED: IntegerField =
    IntegerField::new(&["Total_Outstanding_Balance", "Outstanding_Balance_Secured"]);
/// Outstanding balance, unsecured accounts
pub const BALANCE_UNSECURED: IntegerField =
    IntegerField::new(&["Total_Outstanding_Balance", "Outstanding_Balance_UnSecured"]);

/// Per-account records (optional, repeatable), below the root
pub const ACCOUNTS: &[&str] = &["CAIS_Account", "CAIS_Account_DETAILS"];

/// Account type code
pub const ACCOUNT_TYPE: TextField = TextField::new(&["Account_Type"]);
/// Lender name
pub const SUBSCRIBER_NAME: TextField = TextField::new(&["Subscriber_Name"]);
/// Account number
pub const ACCOUNT_NUMBER: TextField = TextField::new(&["Account_Number"]);
/// Amount past due
pub const AMOUNT_PAST_DUE: IntegerField = IntegerField::new(&["Amount_Past_Due"]);
/// Current balance
pub const CURRENT_BALANCE: IntegerField = IntegerField::new(&["Current_Balance"]);
/// First holder address line
pub const ADDRESS_LINE_1: TextField = TextField::new(&[
    "CAIS_Holder_Address_Details",
    "First_Line_Of_Address_non_normalized",
]);
/// Second holder address line
pub const ADDRESS_LINE_2: TextField = TextField::new(&[
    "CAIS_Holder_Address_Details",
    "Second_Line_Of_Address_non_normalized",
]);
/// Holder city
pub const ADDRESS_CITY: TextField =
    TextField::new(&["CAIS_Holder_Address_Details", "City_non_normalized"]);
/// Holder income tax PAN
pub const HOLDER_PAN: TextField = TextField::new(&["CAIS_Holder_Details", "Income_TAX_PAN"]);

/// Bureau score, below the root
pub const BUREAU_SCORE: IntegerField = IntegerField::new(&["SCORE", "BureauScore"]);

/// Enquiries in the last seven days, below the root
pub const ENQUIRIES_LAST_7_DAYS: IntegerField =
    IntegerField::new(&["TotalCAPS_Summary", "TotalCAPSLast7Days"]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::XmlNode;

    fn section(tag: &str, text: &str) -> XmlElement {
        XmlElement::default().with_child(tag, XmlNode::One(XmlElement::with_text(text)))
    }

    #[test]
    fn test_parse_integer_prefix() {
        assert_eq!(parse_integer("1234.56"), 1234);
        assert_eq!(parse_integer("12abc"), 12);
        assert_eq!(parse_integer("+42"), 42);
        assert_eq!(parse_integer("\t 007 \n"), 7);
    }

    #[test]
    fn test_parse_integer_without_digits() {
        assert_eq!(parse_integer(""), 0);
        assert_eq!(parse_integer("   "), 0);
        assert_eq!(parse_integer("abc"), 0);
        assert_eq!(parse_integer("-12"), 0);
        assert_eq!(parse_integer("+"), 0);
        assert_eq!(parse_integer(".5"), 0);
    }

    #[test]
    fn test_parse_integer_saturates() {
        assert_eq!(parse_integer("9223372036854775807"), INTEGER_MAX);
        assert_eq!(parse_integer("9223372036854775808"), INTEGER_MAX);
        assert_eq!(parse_integer("99999999999999999999999999"), INTEGER_MAX);
    }

    #[test]
    fn test_text_field_default() {
        let element = section("Subscriber_Name", "HDFC");
        assert_eq!(SUBSCRIBER_NAME.read(&element), "HDFC");
        assert_eq!(ACCOUNT_NUMBER.read(&element), TEXT_DEFAULT);
        assert_eq!(ACCOUNT_NUMBER.get(&element), None);
    }

    #[test]
    fn test_integer_field_default() {
        let element = section("Amount_Past_Due", "not a number");
        assert_eq!(AMOUNT_PAST_DUE.read(&element), 0);
        assert_eq!(CURRENT_BALANCE.read(&element), INTEGER_DEFAULT);

        let element = section("Current_Balance", "15000");
        assert_eq!(CURRENT_BALANCE.read(&element), 15000);
    }
}
