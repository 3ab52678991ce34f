//! Class session model

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A unique identifier for a class session, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassSessionId(Uuid);

impl ClassSessionId {
    /// Create a new unique class session ID using UUID v7
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

impl Default for ClassSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClassSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClassSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Day of the week a class session recurs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Lowercase name used for storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// The weekday a calendar date falls on
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            "sunday" | "sun" => Ok(Self::Sunday),
            other => Err(Error::InvalidInput(format!("unknown weekday: {other}"))),
        }
    }
}

/// A recurring class session in the weekly timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    /// Unique identifier
    pub id: ClassSessionId,
    /// Course name
    pub course: String,
    /// Weekday the session recurs on
    pub day: Weekday,
    /// Session start time
    pub start_time: NaiveTime,
    /// Session end time
    pub end_time: NaiveTime,
    /// Room or building
    pub location: String,
    /// Instructor name
    pub instructor: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl ClassSession {
    /// Materialize a session from validated input, assigning id and timestamp.
    #[must_use]
    pub fn from_new(new: NewClassSession) -> Self {
        Self {
            id: ClassSessionId::new(),
            course: new.course,
            day: new.day,
            start_time: new.start_time,
            end_time: new.end_time,
            location: new.location,
            instructor: new.instructor,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Validated input for creating a class session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClassSession {
    pub course: String,
    pub day: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub instructor: String,
}

impl NewClassSession {
    /// Create a new class session input.
    ///
    /// The course name must be non-empty and the start time must precede
    /// the end time.
    pub fn new(
        course: impl Into<String>,
        day: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        location: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Result<Self> {
        let course = course.into().trim().to_string();
        if course.is_empty() {
            return Err(Error::InvalidInput(
                "class course name cannot be empty".to_string(),
            ));
        }
        if start_time >= end_time {
            return Err(Error::InvalidInput(
                "class start time must be before end time".to_string(),
            ));
        }

        Ok(Self {
            course,
            day,
            start_time,
            end_time,
            location: location.into().trim().to_string(),
            instructor: instructor.into().trim().to_string(),
        })
    }
}
