//! Order report fetch and photo extraction.
//!
//! A report is fetched per cycle and day. Rows whose flag column reads
//! `ver foto` are kept and each gets a CDN photo URL built from its
//! identifier fields.

mod date;
mod export;
mod photo_url;
mod transform;
mod types;

pub use date::today_at_offset;
pub use export::{export_batch, export_report, ExportFile, URL_COLUMN_HEADER};
pub use photo_url::PhotoUrlTemplate;
pub use transform::{extract_photo_orders, identifier_headers};
pub use types::*;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::OrdersConfig;
use crate::metrics::PHOTO_ORDERS_EXTRACTED;
use crate::portal::{Portal, Session};
use crate::workbook::{read_first_sheet, WorkbookError};

/// Errors raised while fetching or transforming a report.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The portal answered with something other than a spreadsheet. Usually
    /// an expired session or an unknown cycle code; the two look the same.
    #[error("Report for cycle {cycle} is unavailable (session expired or invalid cycle)")]
    ReportUnavailable { cycle: String },

    #[error("Report request failed: {0}")]
    Transport(String),

    #[error("Report has {found} columns, at least {required} are required")]
    TooFewColumns { found: usize, required: usize },

    #[error("Report is not a readable spreadsheet: {0}")]
    Workbook(#[from] WorkbookError),
}

impl OrdersError {
    /// Whether the report arrived but its contents have the wrong shape.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::TooFewColumns { .. } | Self::Workbook(_))
    }
}

/// Fetch the report of one cycle and extract its photo orders.
///
/// A report with no flagged rows is returned as an empty [`PhotoReport`].
pub async fn fetch_photo_report(
    portal: &dyn Portal,
    session: &Session,
    cycle: &str,
    date: NaiveDate,
    config: &OrdersConfig,
) -> Result<PhotoReport, OrdersError> {
    let cycle = cycle.trim();
    let bytes = portal.download_report(session, cycle, date).await?;
    let table = read_first_sheet(&bytes)?;

    let template = PhotoUrlTemplate::from_config(config);
    let orders = extract_photo_orders(&table, cycle, config, &template)?;
    PHOTO_ORDERS_EXTRACTED.inc_by(orders.len() as u64);

    if orders.is_empty() {
        warn!("Cycle {} has no rows flagged '{}'", cycle, config.flag_value);
    } else {
        info!("Cycle {}: {} photo orders on {}", cycle, orders.len(), date);
    }

    Ok(PhotoReport {
        cycle: cycle.to_string(),
        date,
        headers: identifier_headers(&table, config),
        orders,
    })
}

/// Fetch several cycles one after another.
///
/// A failing cycle is recorded in [`BatchReport::failures`] and the loop
/// moves on; cycles without photo rows are listed in [`BatchReport::empty`].
pub async fn fetch_batch(
    portal: &dyn Portal,
    session: &Session,
    cycles: &[String],
    date: NaiveDate,
    config: &OrdersConfig,
) -> BatchReport {
    let mut batch = BatchReport::new(date);

    for cycle in cycles {
        match fetch_photo_report(portal, session, cycle, date, config).await {
            Ok(report) if report.is_empty() => batch.empty.push(report.cycle),
            Ok(report) => batch.orders.extend(report.orders),
            Err(e) => {
                warn!("Skipping cycle {} in batch: {}", cycle, e);
                batch.failures.push(CycleFailure {
                    cycle: cycle.trim().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    batch
}
