//! Read purchase-requisitioner rows from Excel files

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

use crate::import::types::RawRow;

/// Header names the sheet must contain
mod cols {
    pub const USERNAME: &str = "Purchase Requisitioners";
    pub const SECTION: &str = "Sections";
    pub const EMAIL: &str = "E-mail ID";
    pub const MOBILE: &str = "Mobile number";
    pub const EMPLOYEE_ID: &str = "Employee ID";
}

pub const REQUIRED_COLUMNS: [&str; 5] = [
    cols::USERNAME,
    cols::SECTION,
    cols::EMAIL,
    cols::MOBILE,
    cols::EMPLOYEE_ID,
];

/// Required columns absent from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns(pub Vec<String>);

impl std::fmt::Display for MissingColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Missing columns in Excel file: {:?}", self.0)
    }
}

impl std::error::Error for MissingColumns {}

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub username: usize,
    pub section: usize,
    pub email: usize,
    pub mobile: usize,
    pub employee_id: usize,
}

impl ColumnMap {
    /// Locate every required column, or report all of the missing ones
    pub fn locate(headers: &[String]) -> std::result::Result<Self, MissingColumns> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|name| find(*name).is_none())
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(MissingColumns(missing));
        }

        let position =
            |name: &str| find(name).ok_or_else(|| MissingColumns(vec![name.to_string()]));
        Ok(Self {
            username: position(cols::USERNAME)?,
            section: position(cols::SECTION)?,
            email: position(cols::EMAIL)?,
            mobile: position(cols::MOBILE)?,
            employee_id: position(cols::EMPLOYEE_ID)?,
        })
    }

    fn extract(&self, row: &[Data], row_number: usize) -> RawRow {
        RawRow {
            row_number,
            username: cell_text(row, self.username),
            section: cell_text(row, self.section),
            email: cell_text(row, self.email),
            mobile: cell_text(row, self.mobile),
            employee_id: cell_text(row, self.employee_id),
        }
    }
}

/// Workbook layout information for the selected sheet
#[derive(Debug, Clone)]
pub struct SheetHeader {
    /// Every sheet in the workbook, in workbook order
    pub sheet_names: Vec<String>,
    /// The sheet that was read
    pub sheet_name: String,
    /// Header row, trimmed
    pub columns: Vec<String>,
    /// Rows below the header
    pub data_rows: usize,
}

/// One sheet of an opened workbook, header already parsed
#[derive(Debug, Clone)]
pub struct WorkbookSheet {
    pub header: SheetHeader,
    range: Range<Data>,
}

impl WorkbookSheet {
    /// Open `path` and load `sheet`, or the first sheet when `None`
    pub fn open<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

        let sheet_name = match sheet {
            Some(name) => {
                if !sheet_names.iter().any(|s| s == name) {
                    anyhow::bail!(
                        "Sheet '{}' not found in {} (available: {:?})",
                        name,
                        path.display(),
                        sheet_names
                    );
                }
                name.to_string()
            }
            None => sheet_names
                .first()
                .context("Excel file has no sheets")?
                .clone(),
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        let columns: Vec<String> = range
            .rows()
            .next()
            .map(|row| {
                row.iter()
                    .map(|c| cell_to_text(c).map(|s| s.trim().to_string()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        let data_rows = range.height().saturating_sub(1);

        Ok(Self {
            header: SheetHeader {
                sheet_names,
                sheet_name,
                columns,
                data_rows,
            },
            range,
        })
    }

    /// Every data row below the header
    ///
    /// Fails with [`MissingColumns`] when any required header is absent.
    pub fn requisitioners(&self) -> std::result::Result<Vec<RawRow>, MissingColumns> {
        let columns = ColumnMap::locate(&self.header.columns)?;

        // Row numbers are 1-based and account for where the used range starts
        let first_row = self.range.start().map(|(row, _)| row as usize).unwrap_or(0);

        let rows = self
            .range
            .rows()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| columns.extract(row, first_row + idx + 1))
            .collect::<Vec<_>>();

        log::info!(
            "Read {} rows from sheet '{}'",
            rows.len(),
            self.header.sheet_name
        );
        Ok(rows)
    }
}

fn cell_text(row: &[Data], col: usize) -> Option<String> {
    row.get(col).and_then(cell_to_text)
}

/// Convert an Excel cell to the text stored in the database
fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            // Whole numbers (phone numbers, employee IDs) lose the ".0"
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if dt.is_datetime() => {
                Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            // Durations and out-of-range dates keep their serial value
            _ => Some(dt.as_f64().to_string()),
        },
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
    }
}
