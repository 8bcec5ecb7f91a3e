use rust_xlsxwriter::Workbook;

use super::WorkbookError;

const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Write a single-sheet workbook and return its bytes.
///
/// The header row comes first. Empty strings are left as blank cells.
pub fn write_sheet(
    sheet_name: &str,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<Vec<u8>, WorkbookError> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    if rows.len() + 1 > MAX_ROWS || columns > MAX_COLUMNS {
        return Err(WorkbookError::TooLarge {
            rows: rows.len(),
            columns,
        });
    }

    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet_name)
            .map_err(|e| WorkbookError::Write(e.to_string()))?;

        let all_rows = std::iter::once(headers).chain(rows.iter().map(Vec::as_slice));
        for (row_idx, row) in all_rows.enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(row_idx as u32, col_idx as u16, value.as_str())
                    .map_err(|e| WorkbookError::Write(e.to_string()))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| WorkbookError::Write(e.to_string()))
}
