//! Pending event form.
//!
//! The form is plain data updated by `EventForm::apply`, one edit at a time.

use crate::database::models::{CreateEvent, EventFilter, EventType};
use crate::services::image_upload::ImageFile;
use chrono::{NaiveDate, NaiveTime};
use validator::Validate;

/// One edit made by the admin to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Name(String),
    Date(NaiveDate),
    Attended(i64),
    Type(EventType),
    Organizer(String),
    Description(String),
    Filter(EventFilter),
    Image(ImageFile),
}

/// Values accumulated while the create form is open.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub date: NaiveDate,
    pub attended: i64,
    pub event_type: EventType,
    pub organizer: String,
    pub description: String,
    pub filter: EventFilter,
    pub image: Option<ImageFile>,
}

impl EventForm {
    /// Empty form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            date: today,
            attended: 0,
            event_type: EventType::Workshop,
            organizer: String::new(),
            description: String::new(),
            filter: EventFilter::Year2022to2023,
            image: None,
        }
    }

    /// Returns the form with one field replaced.
    pub fn apply(self, field: FormField) -> Self {
        match field {
            FormField::Name(name) => Self { name, ..self },
            FormField::Date(date) => Self { date, ..self },
            FormField::Attended(attended) => Self { attended, ..self },
            FormField::Type(event_type) => Self { event_type, ..self },
            FormField::Organizer(organizer) => Self { organizer, ..self },
            FormField::Description(description) => Self {
                description,
                ..self
            },
            FormField::Filter(filter) => Self { filter, ..self },
            FormField::Image(image) => Self {
                image: Some(image),
                ..self
            },
        }
    }

    /// Validates every field except the image, which has no URL until it is
    /// uploaded. Returns the joined field messages on failure.
    pub fn check(&self) -> Result<(), String> {
        let Err(errors) = self.to_payload(String::new()).validate() else {
            return Ok(());
        };

        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .filter(|(field, _)| *field != "image")
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_deref().unwrap_or("Invalid value")
                    )
                })
            })
            .collect();

        if messages.is_empty() {
            return Ok(());
        }
        messages.sort();
        Err(messages.join(", "))
    }

    /// Builds the create payload once the image is hosted at `image_url`.
    pub fn to_payload(&self, image_url: String) -> CreateEvent {
        CreateEvent {
            name: self.name.clone(),
            date: self.date.and_time(NaiveTime::MIN).and_utc(),
            attended: self.attended,
            event_type: self.event_type,
            image: image_url,
            organizer: self.organizer.clone(),
            description: self.description.clone(),
            filter: self.filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn new_form_uses_defaults() {
        let form = EventForm::new(today());
        assert!(form.name.is_empty());
        assert_eq!(form.attended, 0);
        assert_eq!(form.event_type, EventType::Workshop);
        assert_eq!(form.filter, EventFilter::Year2022to2023);
        assert!(form.image.is_none());
    }

    #[test]
    fn apply_replaces_only_the_edited_field() {
        let form = EventForm::new(today())
            .apply(FormField::Name("Intro to Rust".into()))
            .apply(FormField::Filter(EventFilter::Year2023to2024))
            .apply(FormField::Attended(40));

        assert_eq!(form.name, "Intro to Rust");
        assert_eq!(form.filter, EventFilter::Year2023to2024);
        assert_eq!(form.attended, 40);
        assert_eq!(form.event_type, EventType::Workshop);
        assert_eq!(form.date, today());
    }

    #[test]
    fn payload_carries_uploaded_url_and_midnight_date() {
        let payload = EventForm::new(today())
            .apply(FormField::Name("Intro to Rust".into()))
            .apply(FormField::Organizer("CS Club".into()))
            .to_payload("https://img/abc.png".to_string());

        assert_eq!(payload.image, "https://img/abc.png");
        assert_eq!(payload.organizer, "CS Club");
        assert_eq!(
            payload.date,
            Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn check_ignores_the_missing_image_url() {
        let form = EventForm::new(today())
            .apply(FormField::Name("Intro to Rust".into()))
            .apply(FormField::Organizer("CS Club".into()));
        assert_eq!(form.check(), Ok(()));
    }

    #[test]
    fn check_reports_invalid_fields() {
        let form = EventForm::new(today())
            .apply(FormField::Organizer("CS Club".into()))
            .apply(FormField::Attended(-1));

        let message = form.check().unwrap_err();
        assert!(message.contains("name:"));
        assert!(message.contains("attended:"));
        assert!(!message.contains("image"));
    }
}
