//! Console summary and skipped-row export

use anyhow::{Context, Result};
use colored::*;
use csv::Writer;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use super::excel::SheetHeader;
use super::types::{ImportReport, SkippedRow};
use crate::repository::end_users::TABLE;

/// Print the workbook layout that was read
pub fn print_sheet_layout(header: &SheetHeader) {
    println!("Available sheets: {:?}", header.sheet_names);
    println!("Column names found: {:?}", header.columns);
}

/// Headline for a finished run
pub fn summary_line(report: &ImportReport) -> String {
    if report.dry_run {
        format!(
            "Dry run: {} of {} rows would be inserted into {} table",
            report.valid_rows, report.total_rows, TABLE
        )
    } else {
        format!(
            "Data imported successfully: {} rows inserted into {} table",
            report.inserted, TABLE
        )
    }
}

/// Print the summary followed by every skipped row
pub fn print_summary(report: &ImportReport) {
    println!("{}", summary_line(report).green().bold());

    if !report.skipped.is_empty() {
        println!("{}", "Skipped rows:".yellow().bold());
        for skipped in &report.skipped {
            println!("{}", skipped);
        }
    }
}

/// Render the report as pretty JSON
pub fn report_json(report: &ImportReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

pub fn print_json(report: &ImportReport) -> Result<()> {
    println!("{}", report_json(report)?);
    Ok(())
}

/// Write skipped rows to `path`, as XLSX when the extension says so and CSV otherwise
pub fn write_skipped_report(path: &Path, skipped: &[SkippedRow]) -> Result<()> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

    if is_xlsx {
        write_skipped_xlsx(path, skipped)?;
    } else {
        write_skipped_csv(path, skipped)?;
    }

    log::info!("Skipped-row report written to: {}", path.display());
    Ok(())
}

fn write_skipped_csv(path: &Path, skipped: &[SkippedRow]) -> Result<()> {
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    wtr.write_record(["Row", "Reason"])
        .context("Failed to write CSV header")?;

    for row in skipped {
        wtr.write_record([row.row_number.to_string(), row.reason.to_string()])
            .with_context(|| format!("Failed to write skipped row {}", row.row_number))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

fn write_skipped_xlsx(path: &Path, skipped: &[SkippedRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Skipped rows")?;

    let header_format = Format::new().set_bold();
    sheet.write_string_with_format(0, 0, "Row", &header_format)?;
    sheet.write_string_with_format(0, 1, "Reason", &header_format)?;

    for (idx, row) in skipped.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_number(r, 0, row.row_number as f64)?;
        sheet.write_string(r, 1, row.reason.to_string())?;
    }

    sheet.set_column_width(0, 8)?;
    sheet.set_column_width(1, 80)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file to {}", path.display()))?;
    Ok(())
}
