//! Effects behind the admin page actions.
//!
//! Submitting checks the form fields, uploads the selected image, creates the
//! event with the hosted URL, then refetches the list. Deleting calls the delete procedure and
//! refetches only on success. Every outcome leaves a notification on the page.

use super::client::{ClientError, EventsApi};
use super::page::{AdminPage, FormState, NotificationKind};
use crate::database::models::Event;
use crate::services::image_upload::{ImageUploader, UploadError};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("The event form is not open")]
    FormClosed,
    #[error("No image selected")]
    MissingImage,
    #[error("Invalid event: {0}")]
    Invalid(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Create(#[from] ClientError),
}

pub struct AdminController<A, U> {
    api: A,
    uploader: U,
}

impl<A: EventsApi> AdminController<A, ()> {
    /// Controller for listing and deleting only.
    pub fn without_uploader(api: A) -> Self {
        Self { api, uploader: () }
    }
}

impl<A: EventsApi, U> AdminController<A, U> {
    pub fn new(api: A, uploader: U) -> Self {
        Self { api, uploader }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Reloads the event list into the page.
    pub async fn refresh(&self, page: &mut AdminPage) -> Result<(), ClientError> {
        let events = self.api.list_all().await?;
        page.set_events(events);
        Ok(())
    }

    /// Deletes an event and refetches the list on success.
    pub async fn delete(&self, page: &mut AdminPage, id: i64) -> Result<Event, ClientError> {
        let event = match self.api.delete(id).await {
            Ok(event) => event,
            Err(e) => {
                warn!(event_id = id, "Event deletion failed: {}", e);
                page.notify(
                    NotificationKind::Error,
                    format!("Error deleting event: {}", e),
                );
                return Err(e);
            }
        };

        page.notify(NotificationKind::Success, "Event deleted successfully");
        if let Err(e) = self.refresh(page).await {
            warn!("Refetch after delete failed: {}", e);
            page.notify(NotificationKind::Error, "Error fetching events");
        }

        Ok(event)
    }
}

impl<A: EventsApi, U: ImageUploader> AdminController<A, U> {
    /// Submits the open form.
    ///
    /// On failure the form stays open with its values and an error
    /// notification is raised. Nothing is uploaded while the other fields
    /// are invalid, and nothing is created when the upload fails.
    pub async fn submit(&self, page: &mut AdminPage) -> Result<Event, SubmitError> {
        let form = match page.form() {
            FormState::Visible(form) => form.clone(),
            FormState::Hidden => return Err(SubmitError::FormClosed),
        };

        let Some(image) = form.image.clone() else {
            page.notify(NotificationKind::Error, "Please select an image");
            return Err(SubmitError::MissingImage);
        };

        if let Err(message) = form.check() {
            page.notify(
                NotificationKind::Error,
                format!("Error adding event: {}", message),
            );
            return Err(SubmitError::Invalid(message));
        }

        let image_url = match self.uploader.upload(image).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Image upload failed: {}", e);
                page.notify(NotificationKind::Error, "Error uploading image");
                return Err(e.into());
            }
        };

        let event = match self.api.create(form.to_payload(image_url)).await {
            Ok(event) => event,
            Err(e) => {
                warn!("Event creation failed: {}", e);
                page.notify(NotificationKind::Error, format!("Error adding event: {}", e));
                return Err(e.into());
            }
        };

        info!(event_id = event.id, "Event submitted");
        page.close_form();

        match self.refresh(page).await {
            Ok(()) => page.notify(NotificationKind::Success, "Event added successfully"),
            Err(e) => {
                warn!("Refetch after create failed: {}", e);
                page.notify(NotificationKind::Error, "Error fetching events");
            }
        }

        Ok(event)
    }
}
