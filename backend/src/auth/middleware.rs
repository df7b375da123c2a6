//! Middleware for protecting authenticated routes and handling authorization.
//!
//! `jwt_auth` turns a bearer token into `Claims`; `admin_auth` is the single
//! authorization guard placed in front of every mutating event procedure.

use crate::api::common::{error_response, service_error_to_http};
use crate::services::user_service::UserService;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

fn unauthenticated(message: &str) -> (StatusCode, String) {
    error_response(StatusCode::UNAUTHORIZED, message, "unauthenticated", None)
}

fn missing_extension(name: &str) -> (StatusCode, String) {
    tracing::error!("{} extension is not installed on the router", name);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        "internal_error",
        None,
    )
}

/// JWT authentication middleware
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| unauthenticated("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthenticated("Authorization header must use the Bearer scheme"))?;

    let jwt_utils = request
        .extensions()
        .get::<JwtUtils>()
        .ok_or_else(|| missing_extension("JwtUtils"))?;

    let claims = jwt_utils
        .validate_token(token)
        .map_err(|_| unauthenticated("Invalid or expired token"))?;

    // Add claims to request extensions for use in handlers
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin authorization middleware
///
/// Must run after `jwt_auth`. The user is re-read from the database so a
/// revoked admin flag takes effect immediately.
pub async fn admin_auth(mut request: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    let user_id = request
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.user_id().to_string())
        .ok_or_else(|| unauthenticated("Authentication required"))?;

    let pool = request
        .extensions()
        .get::<SqlitePool>()
        .cloned()
        .ok_or_else(|| missing_extension("SqlitePool"))?;

    let admin = UserService::new(&pool)
        .require_admin(&user_id)
        .await
        .map_err(service_error_to_http)?;

    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}
