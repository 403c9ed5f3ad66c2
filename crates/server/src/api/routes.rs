//! API route definitions

use crate::api::handlers;
use crate::app::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Create the main API router
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Event admin endpoints
        .route("/events", get(handlers::list_events))
        .route("/events", post(handlers::create_event))
        .route("/events/:event_id", get(handlers::get_event))
        .route("/events/:event_id", put(handlers::edit_event))
        // Health endpoint
        .route("/healthz", get(handlers::health_check))
}
