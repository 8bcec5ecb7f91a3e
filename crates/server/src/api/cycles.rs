//! Cycle listing for the session's unit.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use repartos_core::{Cycle, UnitId};

use super::error::{catalog_error, ApiError};
use super::middleware::CurrentSession;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CyclesResponse {
    pub unit_id: UnitId,
    pub cycles: Vec<Cycle>,
}

/// GET /api/v1/cycles
pub async fn list_cycles(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<CyclesResponse>, ApiError> {
    let cycles = state
        .service()
        .cycles(&current.session)
        .await
        .map_err(|e| catalog_error(&e))?;

    Ok(Json(CyclesResponse {
        unit_id: current.session.unit_id(),
        cycles,
    }))
}
