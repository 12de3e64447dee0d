//! CreditSea CLI library.
//!
//! Command-line access to bureau reports: extract a report locally, or
//! upload, list and inspect reports held by a CreditSea server.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
