//! Core business logic for session issuance.

use crate::auth::models::*;
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

/// Authentication service for handling login and token generation
pub struct AuthService<'a> {
    jwt_utils: &'a JwtUtils,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, jwt_utils: &'a JwtUtils) -> Self {
        AuthService {
            jwt_utils,
            user_service: UserService::new(pool),
        }
    }

    /// Authenticate user and generate a JWT access token
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        if let Err(validation_errors) = login_request.validate() {
            return Err(ServiceError::from_validation_errors(&validation_errors));
        }

        let user = self
            .user_service
            .authenticate_user(&login_request.username, &login_request.password)
            .await?;

        let access_token = self.jwt_utils.generate_token(user.id.clone())?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            user: user.into(),
            expires_in: self.jwt_utils.expires_in_seconds(),
        })
    }

    /// Resolves the user behind a session
    pub async fn current_user(&self, user_id: &str) -> ServiceResult<UserInfo> {
        let user = self
            .user_service
            .get_user_required(user_id)
            .await
            .map_err(|e| match e {
                ServiceError::NotFound { .. } => {
                    ServiceError::unauthenticated("Session user no longer exists")
                }
                other => other,
            })?;

        Ok(user.into())
    }
}
