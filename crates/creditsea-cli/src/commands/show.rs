//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use creditsea_domain::ReportId;
use creditsea_sdk::CreditSeaClient;

/// Execute the show command.
pub async fn execute_show(
    args: ShowArgs,
    client: &CreditSeaClient,
    formatter: &Formatter,
) -> Result<()> {
    let id = parse_report_id(&args.id)?;

    let report = client
        .get_report(id)
        .await?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;

    println!("{}", formatter.format_stored(&report)?);

    Ok(())
}

fn parse_report_id(input: &str) -> Result<ReportId> {
    input.trim().parse().map_err(|e: String| {
        CliError::InvalidInput(format!("Invalid report ID '{}': {}", input, e))
    })
}
