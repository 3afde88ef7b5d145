//! `import` subcommand

mod handler;

pub use handler::handle_import_command;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportCommands {
    /// Spreadsheet to import (defaults to the configured file)
    pub file: Option<PathBuf>,

    /// Target database URL (postgres://... or sqlite://...)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Sheet to read instead of the first one
    #[arg(long)]
    pub sheet: Option<String>,

    /// Password assigned to every imported user
    #[arg(long)]
    pub password: Option<String>,

    /// Validate only; do not connect to the database
    #[arg(long)]
    pub dry: bool,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write skipped rows to a CSV or XLSX file
    #[arg(long)]
    pub skipped_report: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
