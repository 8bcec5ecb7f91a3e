use std::collections::HashSet;

use crate::config::CatalogConfig;
use crate::portal::UnitId;
use crate::workbook::{cell, Table};

use super::{CatalogError, Cycle};

/// Select the catalog rows owned by `unit`.
///
/// The unit column is coerced to an integer; text that is not a number, or a
/// number with a fractional part, never matches. Rows without a code are
/// skipped and a repeated code keeps its first row.
pub fn cycles_for_unit(
    table: &Table,
    config: &CatalogConfig,
    unit: UnitId,
) -> Result<Vec<Cycle>, CatalogError> {
    let unit_col = find_column(table, &config.unit_column)?;
    let code_col = find_column(table, &config.code_column)?;
    let name_col = find_column(table, &config.name_column)?;

    let mut seen = HashSet::new();
    let cycles = table
        .rows
        .iter()
        .filter(|row| coerce_unit(cell(row, unit_col)) == Some(unit.0))
        .filter_map(|row| {
            let code = cell(row, code_col).trim();
            if code.is_empty() || !seen.insert(code.to_string()) {
                return None;
            }
            Some(Cycle::new(code, cell(row, name_col).trim()))
        })
        .collect();

    Ok(cycles)
}

fn find_column(table: &Table, header: &str) -> Result<usize, CatalogError> {
    table.column_index(header).ok_or_else(|| {
        CatalogError::Unavailable(format!("catalog has no '{}' column", header))
    })
}

/// Numeric coercion of an owning-unit cell.
fn coerce_unit(value: &str) -> Option<i64> {
    let number = value.trim().parse::<f64>().ok()?;
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 9.0e15 {
        Some(number as i64)
    } else {
        None
    }
}
