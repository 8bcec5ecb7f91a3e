//! Testing utilities and a mock SIGOF portal.
//!
//! Lets the pipeline and the HTTP layer be exercised without the real
//! portal. Fixtures build spreadsheet bytes the same way the portal exports
//! them: first row headers, one order per row.
//!
//! # Example
//!
//! ```rust,ignore
//! use repartos_core::testing::{fixtures, MockPortal};
//!
//! let portal = MockPortal::new();
//! portal.add_account("ana", "clave", UnitId(7)).await;
//! portal.set_catalog(fixtures::catalog_bytes(&[(7, "101", "Ciclo 101")])).await;
//! ```

mod mock_portal;

pub use mock_portal::{MockPortal, MockReport, RecordedPortalCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use rust_xlsxwriter::Workbook;

    /// Width of a report as exported by the portal.
    pub const REPORT_COLUMNS: usize = 26;

    /// Identifier headers written by `report_bytes`.
    pub const REPORT_HEADERS: [&str; 3] = ["Suministro", "Sector", "Orden"];

    /// Build a full-width report row with the given identifiers and flag.
    pub fn report_row(a: &str, b: &str, c: &str, flag: &str) -> Vec<String> {
        let mut row: Vec<String> = (0..REPORT_COLUMNS)
            .map(|index| format!("v{}", index))
            .collect();
        row[0] = a.to_string();
        row[1] = b.to_string();
        row[2] = c.to_string();
        row[REPORT_COLUMNS - 1] = flag.to_string();
        row
    }

    /// Spreadsheet bytes for a full-width report holding `rows`.
    pub fn report_bytes(rows: &[Vec<String>]) -> Vec<u8> {
        let headers: Vec<String> = (0..REPORT_COLUMNS)
            .map(|index| match REPORT_HEADERS.get(index) {
                Some(header) => header.to_string(),
                None => format!("Col{}", index),
            })
            .collect();
        sheet_bytes(&headers, rows)
    }

    /// Spreadsheet bytes for a report with only `columns` columns.
    pub fn narrow_report_bytes(columns: usize) -> Vec<u8> {
        let headers: Vec<String> = (0..columns).map(|index| format!("Col{}", index)).collect();
        let row: Vec<String> = (0..columns).map(|index| format!("v{}", index)).collect();
        sheet_bytes(&headers, &[row])
    }

    /// Spreadsheet bytes for a catalog of `(unit, code, name)` rows.
    pub fn catalog_bytes(rows: &[(i64, &str, &str)]) -> Vec<u8> {
        let headers = vec![
            "iduunn".to_string(),
            "ciclo".to_string(),
            "nombre".to_string(),
        ];
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|(unit, code, name)| vec![unit.to_string(), code.to_string(), name.to_string()])
            .collect();
        sheet_bytes(&headers, &rows)
    }

    /// Write one sheet; numeric-looking cells become numbers like the portal's export.
    pub fn sheet_bytes(headers: &[String], rows: &[Vec<String>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_string(0, col as u16, header)
                .expect("write header");
        }
        for (index, row) in rows.iter().enumerate() {
            let row_index = index as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                match value.parse::<f64>() {
                    Ok(number) => sheet.write_number(row_index, col as u16, number),
                    Err(_) => sheet.write_string(row_index, col as u16, value),
                }
                .expect("write cell");
            }
        }

        workbook.save_to_buffer().expect("save workbook")
    }
}
