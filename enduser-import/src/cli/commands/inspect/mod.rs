//! `inspect` subcommand

mod handler;

pub use handler::handle_inspect_command;

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectCommands {
    /// Spreadsheet to inspect (defaults to the configured file)
    pub file: Option<PathBuf>,

    /// Sheet to inspect instead of the first one
    #[arg(long)]
    pub sheet: Option<String>,
}
