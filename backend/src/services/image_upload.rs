//! Client for the external image hosting service.
//!
//! Images are sent as a multipart form with a fixed upload preset. A single
//! attempt is made per call; the caller decides what to do on failure.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Upload preset configured on the image host for event images.
pub const UPLOAD_PRESET: &str = "event-uploads";

/// Errors raised while uploading an image. Every variant means the upload failed.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Image file is empty")]
    EmptyFile,
    #[error("Upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Image host returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed upload response: {0}")]
    MalformedResponse(String),
}

/// An image selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reads an image from disk, keeping its file name for the upload.
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self { file_name, bytes })
    }
}

/// Anything able to host an image and hand back its public URL.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, image: ImageFile) -> Result<String, UploadError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: String,
}

/// Uploader for Cloudinary-compatible hosts.
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    http_client: Client,
    base_url: String,
    cloud_name: String,
}

impl CloudinaryUploader {
    pub fn new(base_url: impl Into<String>, cloud_name: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
            cloud_name: cloud_name.into(),
        }
    }

    /// Endpoint images are posted to.
    pub fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

#[async_trait]
impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, image: ImageFile) -> Result<String, UploadError> {
        if image.bytes.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        let part = Part::bytes(image.bytes).file_name(image.file_name);
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", UPLOAD_PRESET);

        let response = self
            .http_client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Image upload failed with status {}", status);
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;

        if body.secure_url.trim().is_empty() {
            return Err(UploadError::MalformedResponse(
                "missing secure_url".to_string(),
            ));
        }

        info!("Image uploaded to {}", body.secure_url);
        Ok(body.secure_url)
    }
}
