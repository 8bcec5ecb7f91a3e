use chrono::NaiveDate;
use serde::Serialize;

use crate::workbook::{write_sheet, WorkbookError};

use super::{BatchReport, PhotoOrder, PhotoReport};

/// Header of the generated URL column.
pub const URL_COLUMN_HEADER: &str = "D";

const CYCLE_COLUMN_HEADER: &str = "Ciclo";
const SHEET_NAME: &str = "Fotos";

/// An xlsx document ready to be downloaded.
#[derive(Debug, Clone, Serialize)]
pub struct ExportFile {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Write a cycle's photo orders: identifier fields followed by the URL.
pub fn export_report(report: &PhotoReport) -> Result<ExportFile, WorkbookError> {
    let mut headers = report.headers.to_vec();
    headers.push(URL_COLUMN_HEADER.to_string());

    let rows: Vec<Vec<String>> = report.orders.iter().map(export_row).collect();

    Ok(ExportFile {
        file_name: format!("ciclo_{}_{}.xlsx", report.cycle, report.date),
        bytes: write_sheet(SHEET_NAME, &headers, &rows)?,
    })
}

/// Write a batch; a leading column names the cycle of each row.
///
/// Batches mix reports, so the identifier headers are the generic A, B, C.
pub fn export_batch(batch: &BatchReport) -> Result<ExportFile, WorkbookError> {
    let headers: Vec<String> = [CYCLE_COLUMN_HEADER, "A", "B", "C", URL_COLUMN_HEADER]
        .iter()
        .map(|h| h.to_string())
        .collect();

    let rows: Vec<Vec<String>> = batch
        .orders
        .iter()
        .map(|order| {
            let mut row = vec![order.cycle.clone()];
            row.extend(export_row(order));
            row
        })
        .collect();

    Ok(ExportFile {
        file_name: batch_file_name(batch.date),
        bytes: write_sheet(SHEET_NAME, &headers, &rows)?,
    })
}

fn batch_file_name(date: NaiveDate) -> String {
    format!("repartos_{}.xlsx", date)
}

fn export_row(order: &PhotoOrder) -> Vec<String> {
    vec![
        order.a.clone(),
        order.b.clone(),
        order.c.clone(),
        order.photo_url.clone(),
    ]
}
