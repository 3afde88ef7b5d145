//! Inspect command handler

use anyhow::Result;
use colored::*;
use std::path::Path;

use super::InspectCommands;
use crate::config::Config;
use crate::import::WorkbookSheet;
use crate::import::excel::{ColumnMap, REQUIRED_COLUMNS};

/// Show the sheets, header row and required-column status of a spreadsheet
pub fn handle_inspect_command(args: InspectCommands, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let path = args.file.unwrap_or(config.spreadsheet);
    let sheet_name = args.sheet.or(config.sheet);

    let sheet = WorkbookSheet::open(&path, sheet_name.as_deref())?;
    let header = &sheet.header;

    println!("File: {}", path.display().to_string().cyan());
    println!("Available sheets: {:?}", header.sheet_names);
    println!(
        "Sheet: {} ({} data rows)",
        header.sheet_name.bright_green().bold(),
        header.data_rows
    );
    println!("Column names found: {:?}", header.columns);
    println!();

    let missing = missing_columns(&header.columns);
    for column in REQUIRED_COLUMNS {
        if missing.iter().any(|m| m == column) {
            println!("  {} {}", "✗".red(), column);
        } else {
            println!("  {} {}", "✓".green(), column);
        }
    }

    if missing.is_empty() {
        println!("\n{}", "All required columns present".green());
    } else {
        println!(
            "\n{}",
            format!("{} required column(s) missing", missing.len()).red()
        );
    }

    Ok(())
}

fn missing_columns(columns: &[String]) -> Vec<String> {
    ColumnMap::locate(columns)
        .err()
        .map(|missing| missing.0)
        .unwrap_or_default()
}
