//! HTTP API request handlers

use crate::app::AppState;
use crate::storage::EventStore;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use types::{EventDraft, EventId, StorageError};
use uuid::Uuid;

const INVALID_EVENT_ID: &str = "Invalid Event ID provided!";
const INVALID_EVENT_DATA: &str = "Invalid Event data provided!";
const EVENT_NOT_FOUND: &str = "Event not found!";
const EVENT_CONFLICT: &str = "Event conflicts with existing data!";
const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable! Please try again later.";
const INTERNAL_ERROR: &str = "Internal Server Error! Please try again later.";

type ApiResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

/// List all events in the fixed summary projection
pub async fn list_events(State(state): State<Arc<AppState>>) -> ApiResult {
    let events = state.store.list().await.map_err(storage_error)?;

    Ok((StatusCode::OK, Json(json!({ "events": events }))))
}

/// Get a single event by ID
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> ApiResult {
    let id = parse_event_id(&event_id)?;

    let event = state.store.find(id).await.map_err(storage_error)?;

    match event {
        Some(event) => Ok((StatusCode::OK, Json(json!({ "event": event })))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": EVENT_NOT_FOUND })),
        )),
    }
}

/// Create a new event from a validated request body
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let draft = parse_body(body)?;

    let event = state.store.create(&draft).await.map_err(storage_error)?;

    tracing::info!(event_id = %event.id, name = %event.name, "Event created");

    Ok((StatusCode::OK, Json(json!({ "event": event }))))
}

/// Replace every field of an existing event
///
/// Check order: body shape first, then ID format, then existence. The
/// existence check is the update itself; zero affected rows maps to 404.
pub async fn edit_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let draft = parse_body(body)?;
    let id = parse_event_id(&event_id)?;

    let event = state.store.update(id, &draft).await.map_err(storage_error)?;

    tracing::info!(event_id = %event.id, "Event updated");

    Ok((StatusCode::OK, Json(json!({ "event": event }))))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult {
    let store_healthy = state.store.ping().await.is_ok();

    let status = if store_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((
        status,
        Json(json!({
            "status": if store_healthy { "healthy" } else { "unhealthy" },
            "version": env!("CARGO_PKG_VERSION"),
            "components": {
                "database": if store_healthy { "healthy" } else { "unhealthy" }
            }
        })),
    ))
}

fn parse_event_id(raw: &str) -> Result<EventId, (StatusCode, Json<Value>)> {
    Uuid::parse_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": INVALID_EVENT_ID })),
        )
    })
}

/// Parse a request body into a validated draft
///
/// Both transport-level rejections (missing or unparseable JSON) and schema
/// failures collapse to the same fixed 400; detail stays server-side.
fn parse_body(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<EventDraft, (StatusCode, Json<Value>)> {
    let Json(value) = body.map_err(|e| {
        tracing::warn!(error = %e, "Rejected unreadable event payload");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": INVALID_EVENT_DATA })),
        )
    })?;

    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "Rejected malformed event payload");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": INVALID_EVENT_DATA })),
        )
    })
}

/// Map a classified storage error to a status code and fixed message
fn storage_error(err: StorageError) -> (StatusCode, Json<Value>) {
    match err {
        StorageError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": EVENT_NOT_FOUND })),
        ),
        StorageError::Conflict(detail) => {
            tracing::warn!(error = %detail, "Storage conflict");
            (
                StatusCode::CONFLICT,
                Json(json!({ "message": EVENT_CONFLICT })),
            )
        }
        StorageError::Unavailable(detail) => {
            tracing::warn!(error = %detail, "Storage unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "message": SERVICE_UNAVAILABLE })),
            )
        }
        StorageError::Query(detail) => {
            // Full detail is only logged on the unexpected kind
            tracing::error!(error = %detail, "Unexpected storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": INTERNAL_ERROR })),
            )
        }
    }
}
