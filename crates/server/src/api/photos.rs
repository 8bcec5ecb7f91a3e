//! Photo galleries and their xlsx exports.

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use repartos_core::{
    workbook::XLSX_MIME, BatchReport, CycleFailure, ExportFile, PhotoFilter, PhotoOrder,
    PhotoReport,
};

use super::error::{api_error, export_error, orders_error, ApiError};
use super::middleware::CurrentSession;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for batch operations
#[derive(Debug, Deserialize)]
pub struct BatchBody {
    /// Cycle codes, fetched in this order
    pub cycles: Vec<String>,
    /// Restrict the gallery to these B values
    #[serde(default)]
    pub groups: Vec<String>,
}

/// One cycle's gallery
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub cycle: String,
    pub date: NaiveDate,
    pub headers: [String; 3],
    /// Every B value in the report, for the filter dropdown
    pub groups: Vec<String>,
    /// Orders in the report before filtering
    pub total: usize,
    pub orders: Vec<PhotoOrder>,
    /// Set when the report has no photo rows
    pub warning: Option<String>,
}

/// Gallery accumulated over several cycles
#[derive(Debug, Serialize)]
pub struct BatchGalleryResponse {
    pub date: NaiveDate,
    pub groups: Vec<String>,
    pub total: usize,
    pub orders: Vec<PhotoOrder>,
    pub empty: Vec<String>,
    pub failures: Vec<CycleFailure>,
    /// One line per empty or failed cycle
    pub warnings: Vec<String>,
}

impl GalleryResponse {
    fn new(report: &PhotoReport, filter: &PhotoFilter) -> Self {
        let warning = report.is_empty().then(|| {
            format!(
                "No photo orders for cycle {} on {}",
                report.cycle, report.date
            )
        });
        Self {
            cycle: report.cycle.clone(),
            date: report.date,
            headers: report.headers.clone(),
            groups: report.groups(),
            total: report.orders.len(),
            orders: filter.apply(&report.orders),
            warning,
        }
    }
}

impl BatchGalleryResponse {
    fn new(batch: &BatchReport, filter: &PhotoFilter) -> Self {
        let warnings = batch
            .empty
            .iter()
            .map(|cycle| format!("No photo orders for cycle {}", cycle))
            .chain(
                batch
                    .failures
                    .iter()
                    .map(|f| format!("Cycle {} failed: {}", f.cycle, f.reason)),
            )
            .collect();
        Self {
            date: batch.date,
            groups: batch.groups(),
            total: batch.orders.len(),
            orders: filter.apply(&batch.orders),
            empty: batch.empty.clone(),
            failures: batch.failures.clone(),
            warnings,
        }
    }
}

/// Collect repeated `group=` parameters; `axum::extract::Query` keeps only one.
fn groups_from_query(query: Option<&str>) -> Vec<String> {
    query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == "group")
        .filter_map(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(|v| v.into_owned())
        })
        .filter(|v| !v.is_empty())
        .collect()
}

fn xlsx_download(file: ExportFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    attachment_file_name(&file.file_name)
                ),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

/// Strip characters that would break out of a quoted header parameter.
fn attachment_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect()
}

fn batch_cycles(body: &BatchBody) -> Result<Vec<String>, ApiError> {
    let cycles: Vec<String> = body
        .cycles
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if cycles.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "No cycles selected"));
    }
    Ok(cycles)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/cycles/{code}/photos?group=..
pub async fn cycle_photos(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Path(code): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<GalleryResponse>, ApiError> {
    let report = state
        .service()
        .photo_report(&current.session, &code)
        .await
        .map_err(|e| orders_error(&e))?;

    let filter = PhotoFilter::with_groups(groups_from_query(query.as_deref()));
    Ok(Json(GalleryResponse::new(&report, &filter)))
}

/// GET /api/v1/cycles/{code}/photos/export?group=..
pub async fn export_cycle_photos(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Path(code): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let report = state
        .service()
        .photo_report(&current.session, &code)
        .await
        .map_err(|e| orders_error(&e))?;

    let filter = PhotoFilter::with_groups(groups_from_query(query.as_deref()));
    let file = state
        .service()
        .export_report(&report.filtered(&filter))
        .map_err(|e| export_error(&e))?;
    Ok(xlsx_download(file))
}

/// POST /api/v1/photos/batch
pub async fn batch_photos(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Json(body): Json<BatchBody>,
) -> Result<Json<BatchGalleryResponse>, ApiError> {
    let cycles = batch_cycles(&body)?;
    let batch = state.service().batch(&current.session, &cycles).await;

    let filter = PhotoFilter::with_groups(body.groups);
    Ok(Json(BatchGalleryResponse::new(&batch, &filter)))
}

/// POST /api/v1/photos/batch/export
pub async fn export_batch_photos(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Json(body): Json<BatchBody>,
) -> Result<Response, ApiError> {
    let cycles = batch_cycles(&body)?;
    let batch = state.service().batch(&current.session, &cycles).await;

    let filter = PhotoFilter::with_groups(body.groups);
    let file = state
        .service()
        .export_batch(&batch.filtered(&filter))
        .map_err(|e| export_error(&e))?;
    Ok(xlsx_download(file))
}
