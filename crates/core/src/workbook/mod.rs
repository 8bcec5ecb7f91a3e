//! Spreadsheet access.
//!
//! Reports and the cycle catalog arrive as xlsx bytes. They are read into a
//! [`Table`] of rendered cell text (first row = headers) with `calamine`, and
//! exports are written back with `rust_xlsxwriter`.

mod reader;
mod writer;

pub use reader::read_first_sheet;
pub use writer::write_sheet;

use serde::Serialize;
use thiserror::Error;

/// MIME type of an `.xlsx` document.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Errors raised while reading or writing workbooks.
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("Failed to open workbook: {0}")]
    Open(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Failed to read sheet: {0}")]
    Sheet(String),

    #[error("Failed to write workbook: {0}")]
    Write(String),

    #[error("Table too large for a worksheet: {rows} rows x {columns} columns")]
    TooLarge { rows: usize, columns: usize },
}

/// First sheet of a workbook as text.
///
/// Every row is padded to [`Table::width`], so positional access never
/// goes out of bounds for indices below the width.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of columns, as the sheet's used range reports it.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Find a column by header, ignoring case and surrounding whitespace.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        let wanted = header.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
    }
}

/// Text of the cell at `index`, or `""` past the end of the row.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or_default()
}

/// Whether a `Content-Type` header value denotes an xlsx document.
///
/// Parameters after `;` are ignored.
pub fn is_xlsx_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(XLSX_MIME))
        .unwrap_or(false)
}
