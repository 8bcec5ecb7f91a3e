use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::middleware::{auth_middleware, metrics_middleware};
use super::{cycles, handlers, photos, session};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Routes that need a logged-in portal session
    let session_routes = Router::new()
        .route(
            "/session",
            get(session::get_session).delete(session::logout),
        )
        // Cycles
        .route("/cycles", get(cycles::list_cycles))
        // Photos
        .route("/cycles/{code}/photos", get(photos::cycle_photos))
        .route(
            "/cycles/{code}/photos/export",
            get(photos::export_cycle_photos),
        )
        .route("/photos/batch", post(photos::batch_photos))
        .route("/photos/batch/export", post(photos::export_batch_photos))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Login
        .route("/session", post(session::login))
        .merge(session_routes)
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
}
