//! CreditSea CLI - Command-line interface for bureau report ingestion.

use clap::Parser;
use creditsea_cli::commands;
use creditsea_cli::{Cli, Command, Config, Formatter};
use creditsea_sdk::CreditSeaClient;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> creditsea_cli::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => load_or_create_config()?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.format);
    let color_enabled = !cli.no_color && config.color;
    let formatter = Formatter::new(format, color_enabled);

    let server_url = cli.server.unwrap_or_else(|| config.server_url.clone());

    let client = || CreditSeaClient::new(&server_url);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config.parser, &formatter).await?;
        }
        Command::Upload(args) => {
            commands::execute_upload(args, &client(), &formatter).await?;
        }
        Command::List(args) => {
            commands::execute_list(args, &client(), &formatter).await?;
        }
        Command::Show(args) => {
            commands::execute_show(args, &client(), &formatter).await?;
        }
    }

    Ok(())
}

/// Load `~/.creditsea/config.toml`, writing the defaults on first run.
fn load_or_create_config() -> creditsea_cli::Result<Config> {
    let first_run = !Config::path()?.exists();
    let config = Config::load()?;

    if first_run {
        if let Err(e) = config.save() {
            debug!("Could not write default config: {}", e);
        }
    }

    Ok(config)
}

/// Logs go to stderr so command output stays machine-readable.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
