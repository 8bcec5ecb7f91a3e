//! Cycle catalog.
//!
//! The catalog is an external spreadsheet listing every meter-reading cycle
//! together with the unit that owns it. A user only sees the cycles of the
//! unit reported by the portal at login.

mod parse;
mod types;

pub use parse::cycles_for_unit;
pub use types::*;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::portal::{Portal, UnitId};
use crate::workbook::read_first_sheet;

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network, parse or layout failure; callers report "catalog unavailable".
    #[error("Cycle catalog unavailable: {0}")]
    Unavailable(String),
}

/// Download the catalog and return the cycles owned by `unit`.
pub async fn load_cycles(
    portal: &dyn Portal,
    config: &CatalogConfig,
    unit: UnitId,
) -> Result<Vec<Cycle>, CatalogError> {
    let bytes = portal.download_catalog().await?;

    let table = read_first_sheet(&bytes).map_err(|e| {
        warn!("Cycle catalog is not a readable workbook: {}", e);
        CatalogError::Unavailable(e.to_string())
    })?;

    let cycles = cycles_for_unit(&table, config, unit)?;
    debug!("Catalog lists {} cycles for unit {}", cycles.len(), unit);
    Ok(cycles)
}
