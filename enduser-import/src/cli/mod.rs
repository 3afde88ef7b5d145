//! Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::import::ImportCommands;
use commands::inspect::InspectCommands;

#[derive(Debug, Parser)]
#[command(name = "enduser-import", version, about = "Import purchase requisitioners into end_users")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the spreadsheet and insert valid rows
    Import(ImportCommands),
    /// Show sheets and columns of a spreadsheet
    Inspect(InspectCommands),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Import(args) => {
                commands::import::handle_import_command(args, self.config.as_deref()).await
            }
            Commands::Inspect(args) => {
                commands::inspect::handle_inspect_command(args, self.config.as_deref())
            }
        }
    }
}
