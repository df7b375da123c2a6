//! Admin events page state.
//!
//! Holds the last fetched event list, whether the create form is shown, and
//! the notifications raised by user actions. Nothing here performs I/O.

use super::form::{EventForm, FormField};
use crate::database::models::{Event, EventFilter};
use chrono::NaiveDate;

/// Order in which filter groups are displayed, newest year first.
pub const GROUP_ORDER: [EventFilter; 5] = [
    EventFilter::Year2023to2024,
    EventFilter::Year2022to2023,
    EventFilter::Year2021to2022,
    EventFilter::Year2020to2021,
    EventFilter::Year2017to2020,
];

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Hidden,
    Visible(EventForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast-style message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Events sharing one filter, in display order.
#[derive(Debug, PartialEq)]
pub struct EventGroup<'a> {
    pub filter: EventFilter,
    pub label: String,
    pub events: Vec<&'a Event>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminPage {
    events: Vec<Event>,
    form: FormState,
    notifications: Vec<Notification>,
}

impl Default for AdminPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminPage {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            form: FormState::Hidden,
            notifications: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn is_form_visible(&self) -> bool {
        matches!(self.form, FormState::Visible(_))
    }

    /// Shows an empty form. An already open form keeps its values.
    pub fn open_form(&mut self, today: NaiveDate) {
        if !self.is_form_visible() {
            self.form = FormState::Visible(EventForm::new(today));
        }
    }

    /// Hides the form and drops its values.
    pub fn close_form(&mut self) {
        self.form = FormState::Hidden;
    }

    /// Applies an edit to the open form. Returns `false` when the form is hidden.
    pub fn edit(&mut self, field: FormField) -> bool {
        match std::mem::replace(&mut self.form, FormState::Hidden) {
            FormState::Visible(form) => {
                self.form = FormState::Visible(form.apply(field));
                true
            }
            FormState::Hidden => false,
        }
    }

    /// Replaces the event list with freshly fetched data.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind,
            message: message.into(),
        });
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Removes and returns pending notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Splits events into filter groups ordered by `GROUP_ORDER`.
    pub fn groups(&self) -> Vec<EventGroup<'_>> {
        GROUP_ORDER
            .iter()
            .map(|filter| EventGroup {
                filter: *filter,
                label: filter.label(),
                events: self
                    .events
                    .iter()
                    .filter(|event| event.filter == *filter)
                    .collect(),
            })
            .collect()
    }

    /// Plain-text rendering of the grouped list.
    pub fn render(&self) -> String {
        let mut out = String::from("Events List\n");

        for group in self.groups() {
            out.push_str(&format!("\n[{}]\n", group.label));
            if group.events.is_empty() {
                out.push_str("  (no events)\n");
                continue;
            }
            for event in group.events {
                out.push_str(&format!(
                    "  #{:<4} {} | {} | {} | {} attended | {}\n",
                    event.id,
                    event.name,
                    event.date.format("%A, %-d %B %Y"),
                    event.event_type,
                    event.attended,
                    event.organizer,
                ));
                out.push_str(&format!("        {}\n", event.image));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::EventType;
    use chrono::{TimeZone, Utc};

    fn event(id: i64, filter: EventFilter) -> Event {
        Event {
            id,
            name: format!("Event {id}"),
            date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            attended: 3,
            event_type: EventType::Meetup,
            image: format!("https://img/{id}.png"),
            organizer: "CS Club".to_string(),
            description: String::new(),
            filter,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn groups_follow_fixed_display_order() {
        let mut page = AdminPage::new();
        page.set_events(vec![
            event(1, EventFilter::Year2017to2020),
            event(2, EventFilter::Year2023to2024),
            event(3, EventFilter::Year2017to2020),
        ]);

        let groups = page.groups();
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "2023 - 2024",
                "2022 - 2023",
                "2021 - 2022",
                "2020 - 2021",
                "2017 - 2020"
            ]
        );

        let ids = |g: &EventGroup<'_>| g.events.iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids(&groups[0]), vec![2]);
        assert!(groups[1].events.is_empty());
        assert_eq!(ids(&groups[4]), vec![1, 3]);
    }

    #[test]
    fn every_event_lands_in_exactly_one_group() {
        let mut page = AdminPage::new();
        page.set_events(
            EventFilter::ALL
                .iter()
                .enumerate()
                .map(|(i, f)| event(i as i64, *f))
                .collect(),
        );

        let total: usize = page.groups().iter().map(|g| g.events.len()).sum();
        assert_eq!(total, page.events().len());
    }

    #[test]
    fn form_toggles_between_hidden_and_visible() {
        let mut page = AdminPage::new();
        assert!(!page.is_form_visible());
        assert!(!page.edit(FormField::Name("ignored".into())));

        page.open_form(today());
        assert!(page.edit(FormField::Name("Intro to Rust".into())));
        page.open_form(today());

        match page.form() {
            FormState::Visible(form) => assert_eq!(form.name, "Intro to Rust"),
            FormState::Hidden => panic!("form should be visible"),
        }

        page.close_form();
        assert_eq!(page.form(), &FormState::Hidden);
    }

    #[test]
    fn notifications_drain_in_order() {
        let mut page = AdminPage::new();
        page.notify(NotificationKind::Error, "first");
        page.notify(NotificationKind::Success, "second");

        let drained = page.drain_notifications();
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].kind, NotificationKind::Success);
        assert!(page.notifications().is_empty());
    }

    #[test]
    fn render_lists_groups_and_events() {
        let mut page = AdminPage::new();
        page.set_events(vec![event(7, EventFilter::Year2021to2022)]);

        let text = page.render();
        assert!(text.contains("[2021 - 2022]"));
        assert!(text.contains("Event 7"));
        assert!(text.contains("Wednesday, 10 January 2024"));
        assert!(text.contains("(no events)"));
    }
}
