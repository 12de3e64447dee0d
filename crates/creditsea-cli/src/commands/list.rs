//! List command implementation.

use crate::cli::ListArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use creditsea_sdk::CreditSeaClient;

/// Execute the list command.
pub async fn execute_list(
    args: ListArgs,
    client: &CreditSeaClient,
    formatter: &Formatter,
) -> Result<()> {
    if args.limit == Some(0) {
        return Err(CliError::InvalidInput(
            "Limit must be greater than 0".to_string(),
        ));
    }

    let reports = client.list_reports(args.limit).await?;
    println!("{}", formatter.format_reports(&reports)?);

    Ok(())
}
