//! Handler functions for the event procedures.

use crate::api::common::{
    ApiResponse, rejection_to_http, service_error_to_http, validation_error_response,
};
use crate::database::models::{CreateEvent, Event, EventFilter, User};
use crate::services::event_service::EventService;
use axum::{
    extract::{
        Extension, Json, Path,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

/// Lists every event.
#[axum::debug_handler]
pub async fn list_all_events(
    Extension(pool): Extension<SqlitePool>,
) -> Result<ResponseJson<ApiResponse<Vec<Event>>>, (StatusCode, String)> {
    let events = EventService::new(&pool)
        .list_all()
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        events,
        "Events retrieved successfully",
    )))
}

/// Lists the events of one academic-year filter.
#[axum::debug_handler]
pub async fn list_events_by_filter(
    Extension(pool): Extension<SqlitePool>,
    filter: Result<Path<EventFilter>, PathRejection>,
) -> Result<ResponseJson<ApiResponse<Vec<Event>>>, (StatusCode, String)> {
    let Path(filter) = filter.map_err(rejection_to_http)?;

    let events = EventService::new(&pool)
        .list_by_filter(filter)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        events,
        "Events retrieved successfully",
    )))
}

/// Creates an event. Only reachable through the admin guard.
#[axum::debug_handler]
pub async fn create_event(
    Extension(pool): Extension<SqlitePool>,
    Extension(admin): Extension<User>,
    payload: Result<Json<CreateEvent>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<Event>>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(rejection_to_http)?;

    if let Err(validation_errors) = payload.validate() {
        return Err(validation_error_response(&validation_errors));
    }

    let event = EventService::new(&pool)
        .create_event(payload)
        .await
        .map_err(service_error_to_http)?;

    info!(event_id = event.id, admin = %admin.username, "Event added by admin");
    Ok(ResponseJson(ApiResponse::success(
        event,
        "Event added successfully",
    )))
}

/// Deletes an event. Only reachable through the admin guard.
#[axum::debug_handler]
pub async fn delete_event(
    Extension(pool): Extension<SqlitePool>,
    Extension(admin): Extension<User>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ResponseJson<ApiResponse<Event>>, (StatusCode, String)> {
    let Path(id) = id.map_err(rejection_to_http)?;

    let event = EventService::new(&pool)
        .delete_event(id)
        .await
        .map_err(service_error_to_http)?;

    info!(event_id = event.id, admin = %admin.username, "Event removed by admin");
    Ok(ResponseJson(ApiResponse::success(
        event,
        "Event deleted successfully",
    )))
}
