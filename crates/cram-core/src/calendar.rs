//! Calendar export
//!
//! Renders planner items as an iCalendar document and builds single-event
//! Google Calendar deep links.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use icalendar::{Calendar, CalendarDateTime, Component, EventLike};

use crate::models::{Assignment, Event};

const UID_DOMAIN: &str = "cram.app";

/// One exportable calendar item, normalized from any planner entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    /// Stable unique id (derived from the entity id)
    pub uid: String,
    /// Event summary line
    pub summary: String,
    /// Start of the event
    pub start: NaiveDateTime,
    /// End of the event
    pub end: NaiveDateTime,
    /// Optional free-form description
    pub description: Option<String>,
    /// Optional venue
    pub location: Option<String>,
}

impl From<&Event> for CalendarEntry {
    fn from(event: &Event) -> Self {
        let start_time = event
            .time
            .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).expect("midnight is valid"));
        let start = event.date.and_time(start_time);

        Self {
            uid: format!("{}@{UID_DOMAIN}", event.id),
            summary: event.title.clone(),
            start,
            end: start + Duration::hours(1),
            description: event.description.clone(),
            location: event.location.clone(),
        }
    }
}

impl From<&Assignment> for CalendarEntry {
    fn from(assignment: &Assignment) -> Self {
        // Due moments have no stored time; pin them to end of day
        let start = assignment
            .due_date
            .and_time(NaiveTime::from_hms_opt(23, 59, 0).expect("valid time"));

        Self {
            uid: format!("{}@{UID_DOMAIN}", assignment.id),
            summary: assignment.title.clone(),
            start,
            end: start,
            description: Some(format!("Course: {}", assignment.course)),
            location: None,
        }
    }
}

/// Render entries as one iCalendar document with a VEVENT per entry.
#[must_use]
pub fn render_calendar(entries: &[CalendarEntry]) -> String {
    let mut calendar = Calendar::new();

    for entry in entries {
        let mut event = icalendar::Event::new();
        event.uid(&entry.uid);
        event.summary(&entry.summary);
        // Planner times are local wall-clock times; export them floating
        event.starts(CalendarDateTime::Floating(entry.start));
        event.ends(CalendarDateTime::Floating(entry.end));

        if let Some(ref description) = entry.description {
            event.description(description);
        }
        if let Some(ref location) = entry.location {
            event.location(location);
        }

        calendar.push(event.done());
    }

    calendar.done().to_string()
}

/// Build a Google Calendar "render" deep link for one entry.
#[must_use]
pub fn google_calendar_url(entry: &CalendarEntry) -> String {
    let dates = format!(
        "{}/{}",
        entry.start.format("%Y%m%dT%H%M%S"),
        entry.end.format("%Y%m%dT%H%M%S")
    );

    let mut url = format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}",
        urlencoding::encode(&entry.summary),
        dates
    );

    if let Some(ref description) = entry.description {
        url.push_str("&details=");
        url.push_str(&urlencoding::encode(description));
    }
    if let Some(ref location) = entry.location {
        url.push_str("&location=");
        url.push_str(&urlencoding::encode(location));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AssignmentId, AssignmentStatus, EventId, EventType, Priority,
    };
    use chrono::NaiveDate;

    fn event() -> Event {
        Event {
            id: EventId::new(),
            title: "Midterm".to_string(),
            date: NaiveDate::from_ymd_opt(2099, 10, 12).unwrap(),
            event_type: EventType::Exam,
            description: Some("Covers weeks 1-6".to_string()),
            location: Some("Hall A".to_string()),
            time: NaiveTime::from_hms_opt(10, 0, 0),
            created_at: 0,
        }
    }

    fn assignment() -> Assignment {
        Assignment {
            id: AssignmentId::new(),
            title: "Problem set 4".to_string(),
            course: "Physics".to_string(),
            due_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            priority: Priority::High,
            status: AssignmentStatus::NotStarted,
            created_at: 0,
        }
    }

    #[test]
    fn entry_from_event_spans_one_hour() {
        let entry = CalendarEntry::from(&event());
        assert_eq!(entry.summary, "Midterm");
        assert_eq!(entry.end - entry.start, Duration::hours(1));
        assert!(entry.uid.ends_with("@cram.app"));
    }

    #[test]
    fn entry_from_event_without_time_starts_at_midnight() {
        let mut bare = event();
        bare.time = None;
        let entry = CalendarEntry::from(&bare);
        assert_eq!(entry.start.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn entry_from_assignment_pins_end_of_day() {
        let entry = CalendarEntry::from(&assignment());
        assert_eq!(entry.start.time(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert_eq!(entry.description.as_deref(), Some("Course: Physics"));
    }

    #[test]
    fn render_emits_one_vevent_per_entry() {
        let event = event();
        let assignment = assignment();
        let entries = vec![CalendarEntry::from(&event), CalendarEntry::from(&assignment)];

        let rendered = render_calendar(&entries);
        assert!(rendered.starts_with("BEGIN:VCALENDAR"));
        assert_eq!(rendered.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(rendered.matches("END:VEVENT").count(), 2);
        assert!(rendered.contains("SUMMARY:Midterm"));
        assert!(rendered.contains("LOCATION:Hall A"));
        assert!(rendered.contains(&format!("UID:{}", entries[0].uid)));
        assert!(rendered.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn google_url_encodes_fields() {
        let entry = CalendarEntry::from(&event());
        let url = google_calendar_url(&entry);

        assert!(url.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
        assert!(url.contains("text=Midterm"));
        assert!(url.contains("dates=20991012T100000/20991012T110000"));
        assert!(url.contains("details=Covers%20weeks%201-6"));
        assert!(url.contains("location=Hall%20A"));
    }
}
