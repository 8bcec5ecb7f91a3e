//! Mapping of pipeline errors to HTTP responses.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use tracing::error;

use repartos_core::{AuthError, CatalogError, OrdersError, WorkbookError};

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Login failures all read the same to the client.
pub fn auth_error(e: &AuthError) -> ApiError {
    match e {
        AuthError::InvalidCredentials => api_error(StatusCode::UNAUTHORIZED, e.to_string()),
        AuthError::ConfigurationError(_) => {
            error!("Portal client misconfigured: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub fn catalog_error(_e: &CatalogError) -> ApiError {
    api_error(StatusCode::SERVICE_UNAVAILABLE, "catalog unavailable")
}

/// Upstream problems are 502; a report with the wrong shape is 422.
pub fn orders_error(e: &OrdersError) -> ApiError {
    if e.is_format_error() {
        api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    } else {
        api_error(StatusCode::BAD_GATEWAY, e.to_string())
    }
}

pub fn export_error(e: &WorkbookError) -> ApiError {
    error!("Failed to write export workbook: {}", e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
