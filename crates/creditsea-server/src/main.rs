//! CreditSea Server CLI
//!
//! Starts the HTTP server for report upload and retrieval.

use creditsea_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let mut config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using defaults");
        eprintln!("Usage: creditsea-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    config.apply_env_overrides()?;

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("CreditSea Server - Bureau report ingestion API");
    println!();
    println!("USAGE:");
    println!("    creditsea-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 5000)");
    println!("    - database_path: SQLite file (default: 'creditsea.db')");
    println!("    - max_upload_bytes: Largest accepted upload (default: 10 MiB)");
    println!("    - static_dir: Directory of UI files to serve (optional)");
    println!("    - [parser]: max_document_bytes, max_depth, trim_text,");
    println!("      normalize_whitespace, explicit_sequences");
    println!();
    println!("ENVIRONMENT:");
    println!("    CREDITSEA_PORT / PORT    Override bind_port");
    println!("    CREDITSEA_DATABASE       Override database_path");
    println!("    RUST_LOG                 Log filter (default: info)");
    println!();
}
