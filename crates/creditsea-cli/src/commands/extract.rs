//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use creditsea_domain::NormalizedReport;
use creditsea_extractor::{extract, parse_document, ParserConfig};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    parser: &ParserConfig,
    formatter: &Formatter,
) -> Result<()> {
    let report = extract_file(&args.file, parser)?;
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Parse and extract the report at `path` without contacting a server.
pub fn extract_file(path: &Path, config: &ParserConfig) -> Result<NormalizedReport> {
    let xml = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", xml.len(), path.display());

    let document = parse_document(&xml, config)?;
    Ok(extract(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    const REPORT: &str = r#"<INProfileResponse>
        <Current_Application><Current_Application_Details><Current_Applicant_Details>
            <First_Name>Jane</First_Name><Last_Name>Doe</Last_Name>
        </Current_Applicant_Details></Current_Application_Details></Current_Application>
        <CAIS_Account><CAIS_Summary/></CAIS_Account>
        <SCORE><BureauScore>710</BureauScore></SCORE>
    </INProfileResponse>"#;

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xml");
        fs::write(&path, REPORT).unwrap();

        let report = extract_file(&path, &ParserConfig::default()).unwrap();
        assert_eq!(report.basic_details.name, "Jane Doe");
        assert_eq!(report.basic_details.credit_score, 710);
        assert!(report.credit_accounts.is_empty());
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_file(&dir.path().join("absent.xml"), &ParserConfig::default());
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_extract_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xml");
        fs::write(&path, "<INProfileResponse><SCORE>").unwrap();

        let result = extract_file(&path, &ParserConfig::default());
        assert!(matches!(result, Err(CliError::Document(_))));
    }

    #[test]
    fn test_extract_wrong_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xml");
        fs::write(&path, "<Other/>").unwrap();

        let result = extract_file(&path, &ParserConfig::default());
        assert!(matches!(result, Err(CliError::Extraction(_))));
    }
}
