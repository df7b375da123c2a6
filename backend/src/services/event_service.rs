//! Event business logic service.
//!
//! Validation happens here before any statement runs. Authorization is not
//! checked here: the admin router applies the guard before these calls.

use crate::database::models::{CreateEvent, Event, EventFilter};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::event_repository::EventRepository;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

/// Service layer for event operations.
pub struct EventService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventService<'a> {
    /// Creates a new EventService instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns every event in storage order.
    pub async fn list_all(&self) -> ServiceResult<Vec<Event>> {
        let repo = EventRepository::new(self.pool);
        Ok(repo.get_all_events().await?)
    }

    /// Returns the events belonging to one academic-year filter.
    pub async fn list_by_filter(&self, filter: EventFilter) -> ServiceResult<Vec<Event>> {
        let repo = EventRepository::new(self.pool);
        Ok(repo.get_events_by_filter(filter).await?)
    }

    /// Validates the payload and stores a new event.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` without touching storage when the
    /// payload is malformed.
    pub async fn create_event(&self, create_event: CreateEvent) -> ServiceResult<Event> {
        if let Err(validation_errors) = create_event.validate() {
            return Err(ServiceError::from_validation_errors(&validation_errors));
        }

        let repo = EventRepository::new(self.pool);
        let event = repo.create_event(create_event).await?;

        info!(event_id = event.id, filter = %event.filter, "Event created");
        Ok(event)
    }

    /// Deletes an event and returns the removed record.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` when no event has the given id.
    pub async fn delete_event(&self, id: i64) -> ServiceResult<Event> {
        let repo = EventRepository::new(self.pool);
        let event = repo
            .delete_event(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", id.to_string()))?;

        info!(event_id = event.id, "Event deleted");
        Ok(event)
    }
}
