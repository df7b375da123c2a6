//! Handler functions for authentication-related API endpoints.

use crate::api::common::{
    ApiResponse, rejection_to_http, service_error_to_http, validation_error_response,
};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use validator::Validate;

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<LoginResponse>>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(rejection_to_http)?;

    if let Err(validation_errors) = payload.validate() {
        return Err(validation_error_response(&validation_errors));
    }

    let response = AuthService::new(&pool, &jwt_utils)
        .login(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(response, "Login successful")))
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, (StatusCode, String)> {
    let user = AuthService::new(&pool, &jwt_utils)
        .current_user(claims.user_id())
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::ok(user)))
}
