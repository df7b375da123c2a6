//! Defines the HTTP routes for the event procedures.

use super::handlers::{create_event, delete_event, list_all_events, list_events_by_filter};
use crate::auth::middleware::{admin_auth, jwt_auth};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Public, read-only event routes.
pub fn event_router() -> Router {
    Router::new()
        .route("/", get(list_all_events))
        .route("/filter/{filter}", get(list_events_by_filter))
}

/// Mutating event routes; every route sits behind the admin guard.
pub fn admin_event_router() -> Router {
    Router::new()
        .route("/", post(create_event))
        .route("/{id}", delete(delete_event))
        .route_layer(middleware::from_fn(admin_auth))
        .route_layer(middleware::from_fn(jwt_auth))
}
