//! Central module for application-wide configuration settings.
//!
//! This module loads the server settings (database, JWT, port, bootstrap
//! admin) and the admin client settings (image host account, API location)
//! from environment variables, reading a `.env` file first when present.

use anyhow::{Context, Result, bail};
use std::env;

/// Default base URL of the image hosting API.
pub const DEFAULT_IMAGE_HOST_BASE_URL: &str = "https://api.cloudinary.com";

/// Default location of the events API used by the admin client.
pub const DEFAULT_EVENTS_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub server_port: u16,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials of an admin account created at startup if it does not exist yet.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let bootstrap_admin = bootstrap_admin(
            env::var("BOOTSTRAP_ADMIN_USERNAME").ok(),
            env::var("BOOTSTRAP_ADMIN_PASSWORD").ok(),
        )?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            server_port,
            bootstrap_admin,
        })
    }
}

fn bootstrap_admin(
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<BootstrapAdmin>> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(BootstrapAdmin { username, password })),
        (None, None) => Ok(None),
        _ => bail!("BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_PASSWORD must be set together"),
    }
}

/// Settings for the admin front-end.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Account name on the image host, part of the upload URL. Only needed
    /// to upload images.
    pub cloud_name: Option<String>,
    pub image_host_base_url: String,
    pub api_url: String,
    pub api_token: Option<String>,
}

impl AdminConfig {
    /// Loads the admin client configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let cloud_name = env::var("CLOUDINARY_CLOUD_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty());

        let image_host_base_url = env::var("IMAGE_HOST_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_IMAGE_HOST_BASE_URL.to_string());

        let api_url =
            env::var("EVENTS_API_URL").unwrap_or_else(|_| DEFAULT_EVENTS_API_URL.to_string());

        let api_token = env::var("EVENTS_API_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        Ok(AdminConfig {
            cloud_name,
            image_host_base_url,
            api_url,
            api_token,
        })
    }

    /// Returns the image host account, failing when none is configured.
    pub fn require_cloud_name(&self) -> Result<&str> {
        self.cloud_name
            .as_deref()
            .context("CLOUDINARY_CLOUD_NAME must be set to upload images")
    }
}
