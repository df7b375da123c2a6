//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database, together with the validated inputs used to create rows.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub id: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1-255 characters"
    ))]
    pub username: String,

    #[validate(length(min = 1, message = "Password hash is required"))]
    pub password_hash: String,

    pub is_admin: bool,
}

/// Kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")] // Store as TEXT in SQLite
pub enum EventType {
    Workshop,
    Hackathon,
    Talk,
    Competition,
    Meetup,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Workshop,
        EventType::Hackathon,
        EventType::Talk,
        EventType::Competition,
        EventType::Meetup,
    ];
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Workshop => write!(f, "Workshop"),
            EventType::Hackathon => write!(f, "Hackathon"),
            EventType::Talk => write!(f, "Talk"),
            EventType::Competition => write!(f, "Competition"),
            EventType::Meetup => write!(f, "Meetup"),
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Workshop" => Ok(EventType::Workshop),
            "Hackathon" => Ok(EventType::Hackathon),
            "Talk" => Ok(EventType::Talk),
            "Competition" => Ok(EventType::Competition),
            "Meetup" => Ok(EventType::Meetup),
            _ => Err(format!("Invalid event type: {}", s)),
        }
    }
}

/// Academic-year bucket an event is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum EventFilter {
    Year2017to2020,
    Year2020to2021,
    Year2021to2022,
    Year2022to2023,
    Year2023to2024,
}

impl EventFilter {
    pub const ALL: [EventFilter; 5] = [
        EventFilter::Year2017to2020,
        EventFilter::Year2020to2021,
        EventFilter::Year2021to2022,
        EventFilter::Year2022to2023,
        EventFilter::Year2023to2024,
    ];

    /// Human readable year range, e.g. `Year2023to2024` becomes `2023 - 2024`.
    pub fn label(&self) -> String {
        self.to_string().replace("Year", "").replace("to", " - ")
    }
}

impl std::fmt::Display for EventFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventFilter::Year2017to2020 => write!(f, "Year2017to2020"),
            EventFilter::Year2020to2021 => write!(f, "Year2020to2021"),
            EventFilter::Year2021to2022 => write!(f, "Year2021to2022"),
            EventFilter::Year2022to2023 => write!(f, "Year2022to2023"),
            EventFilter::Year2023to2024 => write!(f, "Year2023to2024"),
        }
    }
}

impl std::str::FromStr for EventFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Year2017to2020" => Ok(EventFilter::Year2017to2020),
            "Year2020to2021" => Ok(EventFilter::Year2020to2021),
            "Year2021to2022" => Ok(EventFilter::Year2021to2022),
            "Year2022to2023" => Ok(EventFilter::Year2022to2023),
            "Year2023to2024" => Ok(EventFilter::Year2023to2024),
            _ => Err(format!("Invalid event filter: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub date: DateTime<Utc>,
    pub attended: i64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub image: String,
    pub organizer: String,
    pub description: String,
    pub filter: EventFilter,
}

/// Payload accepted by the create procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Event name must be between 1-255 characters"
    ))]
    pub name: String,

    #[serde(deserialize_with = "deserialize_event_date")]
    pub date: DateTime<Utc>,

    #[validate(range(min = 0, message = "Attended count cannot be negative"))]
    pub attended: i64,

    #[serde(rename = "type")]
    pub event_type: EventType,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Organizer must be between 1-255 characters"
    ))]
    pub organizer: String,

    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: String,

    pub filter: EventFilter,
}

/// Accepts either an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
fn deserialize_event_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_event_date(&raw).map_err(Error::custom)
}

/// Parses the date formats accepted for events.
pub fn parse_event_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("Invalid event date '{}': expected YYYY-MM-DD or RFC 3339", raw))
}
