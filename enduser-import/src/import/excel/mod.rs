//! Spreadsheet input for the end-user import
//!
//! Expected layout: header row first, then one purchase requisitioner per
//! row. Only the first sheet is read unless a sheet name is given.

mod reader;

pub use reader::{ColumnMap, REQUIRED_COLUMNS, SheetHeader, WorkbookSheet};
