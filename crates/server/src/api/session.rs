//! Portal login and logout.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use repartos_core::{AuthError, Credentials, UnitId};

use super::error::{auth_error, ApiError};
use super::middleware::CurrentSession;
use crate::metrics::AUTH_FAILURES_TOTAL;
use crate::state::AppState;

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for the authenticated routes
    pub token: String,
    pub username: String,
    pub unit_id: UnitId,
}

/// Current session details
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub username: String,
    pub unit_id: UnitId,
    pub started_at: String,
}

/// POST /api/v1/session
///
/// Run the portal login handshake and keep the resulting session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let session = match state.service().login(&credentials).await {
        Ok(session) => session,
        Err(e) => {
            if matches!(e, AuthError::InvalidCredentials) {
                AUTH_FAILURES_TOTAL
                    .with_label_values(&["portal_rejected"])
                    .inc();
                warn!("Login rejected for {}", credentials.username);
            }
            return Err(auth_error(&e));
        }
    };

    let username = session.username().to_string();
    let unit_id = session.unit_id();
    let token = state.sessions().insert(session).await;
    info!("Session opened for {} (unit {})", username, unit_id);

    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            token,
            username,
            unit_id,
        }),
    ))
}

/// GET /api/v1/session
pub async fn get_session(
    Extension(current): Extension<CurrentSession>,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        username: current.session.username().to_string(),
        unit_id: current.session.unit_id(),
        started_at: current.session.started_at().to_rfc3339(),
    })
}

/// DELETE /api/v1/session
///
/// Drop the session and its cookie jar.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> StatusCode {
    state.sessions().remove(&current.token).await;
    info!("Session closed for {}", current.session.username());
    StatusCode::NO_CONTENT
}
