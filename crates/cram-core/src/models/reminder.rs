//! Reminder model (local-only)

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::assignment::Priority;

/// A unique identifier for a reminder, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderId(Uuid);

impl ReminderId {
    /// Create a new unique reminder ID using UUID v7
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

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReminderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A locally-stored reminder with a due moment.
///
/// Never sent to the remote store. `notified` flips once the due moment
/// has passed; `completed` is user-togglable in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Unique identifier
    pub id: ReminderId,
    /// What to be reminded about
    pub title: String,
    /// Due date
    pub date: NaiveDate,
    /// Due time
    pub time: NaiveTime,
    /// Priority bucket
    pub priority: Priority,
    /// Marked done by the user
    pub completed: bool,
    /// Due moment has passed and was flagged
    pub notified: bool,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Reminder {
    /// The moment this reminder is due.
    #[must_use]
    pub fn moment(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Whether the reminder is past due and still open.
    #[must_use]
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.moment() < now
    }
}

/// Unvalidated input for creating a reminder.
///
/// Date and time stay optional here so the store can report exactly which
/// field is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewReminder {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub priority: Priority,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder_at(date: NaiveDate, time: NaiveTime) -> Reminder {
        Reminder {
            id: ReminderId::new(),
            title: "Return library books".to_string(),
            date,
            time,
            priority: Priority::Medium,
            completed: false,
            notified: false,
            created_at: 0,
        }
    }

    #[test]
    fn test_moment_combines_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        let reminder = reminder_at(date, time);

        assert_eq!(reminder.moment(), date.and_time(time));
    }

    #[test]
    fn test_is_overdue() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        let mut reminder = reminder_at(date, time);

        let before = date.and_time(NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        let after = date.and_time(NaiveTime::from_hms_opt(15, 0, 0).unwrap());

        assert!(!reminder.is_overdue(before));
        assert!(reminder.is_overdue(after));

        reminder.completed = true;
        assert!(!reminder.is_overdue(after));
    }
}
