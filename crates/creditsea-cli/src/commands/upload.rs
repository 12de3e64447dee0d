//! Upload command implementation.

use crate::cli::UploadArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use creditsea_sdk::CreditSeaClient;
use std::fs;
use tracing::debug;

/// Execute the upload command.
pub async fn execute_upload(
    args: UploadArgs,
    client: &CreditSeaClient,
    formatter: &Formatter,
) -> Result<()> {
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CliError::InvalidInput(format!("'{}' is not a file", args.file.display()))
        })?;
    let contents = fs::read(&args.file)?;

    debug!(
        "Uploading {} ({} bytes) to {}",
        file_name,
        contents.len(),
        client.base_url()
    );
    let receipt = client.upload(&file_name, contents).await?;

    println!("{}", formatter.format_upload(&receipt)?);

    Ok(())
}
