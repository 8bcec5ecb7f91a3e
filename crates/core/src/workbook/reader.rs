use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

use super::{Table, WorkbookError};

/// Read the first sheet of an xlsx document.
///
/// The first row of the used range becomes the headers; the remaining rows
/// are data. Cells left of the used range are filled with empty text so
/// column positions match the sheet's letters.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Table, WorkbookError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: calamine::XlsxError| WorkbookError::Open(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(WorkbookError::NoSheets)?
        .map_err(|e| WorkbookError::Sheet(e.to_string()))?;

    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Ok(Table::default());
    }

    let left_pad = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let total_width = left_pad + width;

    let mut rows = range.rows().map(|row| {
        let mut cells = vec![String::new(); left_pad];
        cells.extend(row.iter().map(cell_text));
        cells.resize(total_width, String::new());
        cells
    });

    let headers = rows.next().unwrap_or_default();
    Ok(Table {
        headers,
        rows: rows.collect(),
    })
}

/// Render a cell the way it reads in the sheet.
///
/// Integral numbers drop the decimal part, so an id stored as a float
/// renders as `12345` rather than `12345.0`.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}
