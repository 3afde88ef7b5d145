//! Import command handler

use anyhow::{Context, Result};
use colored::*;
use sqlx::Connection;
use std::path::Path;
use std::time::Instant;

use super::{ImportCommands, OutputFormat};
use crate::config::Config;
use crate::import::{
    ImportReport, RawRow, RowValidator, WorkbookSheet, import_rows, report, validate_rows,
};
use crate::repository::{self, end_users};

/// Handle the import command: read, validate, insert, report
pub async fn handle_import_command(args: ImportCommands, config_path: Option<&Path>) -> Result<()> {
    if args.no_color || args.format == OutputFormat::Json {
        colored::control::set_override(false);
    }

    let config = resolve_config(&args, config_path)?;
    let text = args.format == OutputFormat::Text;

    if !config.spreadsheet.exists() {
        anyhow::bail!("Spreadsheet does not exist: {}", config.spreadsheet.display());
    }

    let sheet = WorkbookSheet::open(&config.spreadsheet, config.sheet.as_deref())?;
    if text {
        report::print_sheet_layout(&sheet.header);
    }

    // Missing columns abort before any database work
    let rows = sheet.requisitioners()?;
    let validator = RowValidator::new(config.default_password.as_str());

    let start = Instant::now();
    let outcome = if args.dry {
        log::info!("Dry run: validating {} rows", rows.len());
        validate_rows(&rows, &validator)
    } else {
        run_import(&config.database_url, &rows, &validator).await?
    };
    log::info!("Import finished in {:.2}s", start.elapsed().as_secs_f64());

    match args.format {
        OutputFormat::Text => report::print_summary(&outcome),
        OutputFormat::Json => report::print_json(&outcome)?,
    }

    if let Some(path) = &args.skipped_report {
        report::write_skipped_report(path, &outcome.skipped)?;
        if text {
            println!("Skipped rows written to: {}", path.display().to_string().cyan());
        }
    }

    Ok(())
}

/// Layer command-line flags over the loaded configuration
fn resolve_config(args: &ImportCommands, config_path: Option<&Path>) -> Result<Config> {
    let mut config = Config::load(config_path)?;

    if let Some(file) = &args.file {
        config.spreadsheet = file.clone();
    }
    if let Some(url) = &args.database_url {
        config.database_url = url.clone();
    }
    if let Some(sheet) = &args.sheet {
        config.sheet = Some(sheet.clone());
    }
    if let Some(password) = &args.password {
        config.default_password = password.clone();
    }

    Ok(config)
}

/// Connect, check the table, import, and always close the connection
async fn run_import(
    database_url: &str,
    rows: &[RawRow],
    validator: &RowValidator,
) -> Result<ImportReport> {
    let mut conn = repository::connect(database_url).await?;

    let outcome = async {
        let existing = end_users::count_end_users(&mut conn).await?;
        log::info!("{} currently holds {} rows", end_users::TABLE, existing);
        import_rows(&mut conn, rows, validator).await
    }
    .await;

    if let Err(err) = conn.close().await {
        log::warn!("Failed to close database connection: {}", err);
    }

    outcome.context("Import failed")
}
