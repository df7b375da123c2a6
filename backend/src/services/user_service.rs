//! User business logic service.
//!
//! Handles credential checks for session issuance and the admin predicate
//! used by the authorization guard.

use crate::config::BootstrapAdmin;
use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    hash_cost: u32,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            hash_cost: DEFAULT_COST,
        }
    }

    /// Overrides the bcrypt cost used for new password hashes.
    pub fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    /// Creates a new user with a freshly hashed password.
    ///
    /// # Errors
    /// Returns `ServiceError` for validation failures or storage errors.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> ServiceResult<User> {
        if password.is_empty() {
            return Err(ServiceError::validation("password: Password is required"));
        }

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            username: username.to_string(),
            password_hash: self.hash_password(password)?,
            is_admin,
        };

        if let Err(validation_errors) = data.validate() {
            return Err(ServiceError::from_validation_errors(&validation_errors));
        }

        let repo = UserRepository::new(self.pool);
        let user = repo.create_user(data).await?;
        Ok(user)
    }

    /// Function to hash a password before storing in database
    fn hash_password(&self, password: &str) -> ServiceResult<String> {
        hash(password, self.hash_cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Verifies a username/password pair.
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::unauthenticated("Invalid username or password"))?;

        let valid = verify(password, &user.password_hash).map_err(|e| {
            ServiceError::internal_error(format!("Password verification failed: {}", e))
        })?;

        if !valid {
            return Err(ServiceError::unauthenticated("Invalid username or password"));
        }

        Ok(user)
    }

    /// Retrieves a user, failing when it does not exist.
    pub async fn get_user_required(&self, user_id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        repo.get_user_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }

    /// Looks the session's user up and checks its admin flag.
    ///
    /// The flag is always read from storage, never from the session itself.
    pub async fn require_admin(&self, user_id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        match repo.get_user_by_id(user_id).await? {
            Some(user) if user.is_admin => Ok(user),
            Some(user) => {
                warn!(user_id = %user.id, "Rejected admin operation for non-admin user");
                Err(ServiceError::not_authorized("You are not an admin"))
            }
            None => {
                warn!(user_id, "Rejected admin operation for unknown user");
                Err(ServiceError::not_authorized("You are not an admin"))
            }
        }
    }

    /// Creates the configured admin account unless the username is taken.
    pub async fn ensure_bootstrap_admin(&self, admin: &BootstrapAdmin) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        if repo.get_user_by_username(&admin.username).await?.is_some() {
            return Ok(());
        }

        let user = self
            .create_user(&admin.username, &admin.password, true)
            .await?;
        info!(user_id = %user.id, username = %user.username, "Bootstrap admin created");
        Ok(())
    }
}
