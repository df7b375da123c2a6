//! Database repository for event management operations.

use crate::database::models::{CreateEvent, Event, EventFilter};
use anyhow::Result;
use sqlx::SqlitePool;

/// Repository for event database operations.
pub struct EventRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    /// Creates a new EventRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new event in the database. Storage assigns the id.
    pub async fn create_event(&self, event: CreateEvent) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, date, attended, event_type, image, organizer, description, filter)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, date, attended, event_type, image, organizer, description, filter
            "#,
        )
        .bind(event.name)
        .bind(event.date)
        .bind(event.attended)
        .bind(event.event_type)
        .bind(event.image)
        .bind(event.organizer)
        .bind(event.description)
        .bind(event.filter)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    /// Retrieves every event.
    pub async fn get_all_events(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, date, attended, event_type, image, organizer, description, filter
            FROM events
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Retrieves the events grouped under one academic-year filter.
    pub async fn get_events_by_filter(&self, filter: EventFilter) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, date, attended, event_type, image, organizer, description, filter
            FROM events
            WHERE filter = ?
            ORDER BY id
            "#,
        )
        .bind(filter)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Deletes an event by id.
    ///
    /// # Returns
    /// The deleted row, or `None` when no event had that id
    pub async fn delete_event(&self, id: i64) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            DELETE FROM events
            WHERE id = ?
            RETURNING id, name, date, attended, event_type, image, organizer, description, filter
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(event)
    }
}
