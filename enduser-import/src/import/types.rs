//! Row, record and report types shared by the import pipeline

use serde::Serialize;

/// Textual content of one spreadsheet row, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based row number as shown in the spreadsheet
    pub row_number: usize,
    pub username: Option<String>,
    pub section: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub employee_id: Option<String>,
}

/// A validated row, ready to be written to `end_users`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndUserRecord {
    pub username: String,
    pub section: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub employee_id: Option<String>,
    pub password: String,
}

/// Why a row was not inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingUsername,
    InvalidUsername(String),
    InvalidEmail(String),
    Database { username: String, message: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingUsername => write!(f, "Missing username"),
            SkipReason::InvalidUsername(username) => write!(
                f,
                "Invalid username '{}' (must contain only letters, spaces, or periods)",
                username
            ),
            SkipReason::InvalidEmail(email) => write!(f, "Invalid email '{}'", email),
            SkipReason::Database { username, message } => {
                write!(f, "Database error for user '{}': {}", username, message)
            }
        }
    }
}

impl std::error::Error for SkipReason {}

impl Serialize for SkipReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A row that was rejected, with its spreadsheet position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row_number: usize,
    pub reason: SkipReason,
}

impl SkippedRow {
    pub fn new(row_number: usize, reason: SkipReason) -> Self {
        Self { row_number, reason }
    }
}

impl std::fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row_number, self.reason)
    }
}

/// Outcome of a full import (or dry) run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Data rows read from the sheet
    pub total_rows: usize,
    /// Rows that passed validation
    pub valid_rows: usize,
    /// Rows reported inserted by the driver
    pub inserted: u64,
    pub skipped: Vec<SkippedRow>,
    pub dry_run: bool,
}

impl ImportReport {
    pub fn skip(&mut self, row_number: usize, reason: SkipReason) {
        log::info!("Skipped row {}: {}", row_number, reason);
        self.skipped.push(SkippedRow::new(row_number, reason));
    }
}
