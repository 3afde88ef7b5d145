//! Spreadsheet-to-database import of purchase requisitioners
//!
//! Pipeline: spreadsheet reader → row validator → row inserter → reporter.

pub mod excel;
pub mod importer;
pub mod report;
pub mod types;
pub mod validate;

pub use excel::WorkbookSheet;
pub use importer::{import_rows, validate_rows};
pub use types::{EndUserRecord, ImportReport, RawRow};
pub use validate::RowValidator;
