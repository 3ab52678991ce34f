//! Calendar event model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::normalize_text_option;

/// A unique identifier for an event, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Create a new unique event ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Kind of calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// End-of-term examination
    Exam,
    /// Continuous assessment test
    Cat,
    #[default]
    Other,
}

impl EventType {
    /// Lowercase name used for storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Cat => "cat",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exam" => Ok(Self::Exam),
            "cat" => Ok(Self::Cat),
            "other" => Ok(Self::Other),
            other => Err(Error::InvalidInput(format!("unknown event type: {other}"))),
        }
    }
}

/// A dated calendar event (exam, test or anything else)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: EventId,
    /// Event title
    pub title: String,
    /// Calendar date
    pub date: NaiveDate,
    /// Kind of event
    pub event_type: EventType,
    /// Optional free-form description
    pub description: Option<String>,
    /// Optional venue
    pub location: Option<String>,
    /// Optional start time
    pub time: Option<NaiveTime>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Event {
    /// Materialize an event from validated input, assigning id and timestamp.
    #[must_use]
    pub fn from_new(new: NewEvent) -> Self {
        Self {
            id: EventId::new(),
            title: new.title,
            date: new.date,
            event_type: new.event_type,
            description: new.description,
            location: new.location,
            time: new.time,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Validated input for creating an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub event_type: EventType,
    pub description: Option<String>,
    pub location: Option<String>,
    pub time: Option<NaiveTime>,
}

impl NewEvent {
    /// Create a new event input with a non-empty title.
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        event_type: EventType,
        description: Option<String>,
        location: Option<String>,
        time: Option<NaiveTime>,
    ) -> Result<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(Error::InvalidInput(
                "event title cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            title,
            date,
            event_type,
            description: normalize_text_option(description),
            location: normalize_text_option(location),
            time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_parse() {
        let id = EventId::new();
        let parsed: EventId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_new_event_normalizes_optionals() {
        let new = NewEvent::new(
            "Midterm",
            NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
            EventType::Exam,
            Some("  ".to_string()),
            Some(" Hall A ".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(new.description, None);
        assert_eq!(new.location, Some("Hall A".to_string()));
    }

    #[test]
    fn test_new_event_rejects_empty_title() {
        let result = NewEvent::new(
            " ",
            NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
            EventType::Other,
            None,
            None,
            None,
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_event_type_round_trip() {
        for event_type in [EventType::Exam, EventType::Cat, EventType::Other] {
            let parsed: EventType = event_type.as_str().parse().unwrap();
            assert_eq!(parsed, event_type);
        }
    }
}
