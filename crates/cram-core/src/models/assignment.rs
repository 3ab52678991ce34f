//! Assignment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A unique identifier for an assignment, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(Uuid);

impl AssignmentId {
    /// Create a new unique assignment ID using UUID v7
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

impl Default for AssignmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssignmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Assignment (and reminder) priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Lowercase name used for storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(Error::InvalidInput(format!("unknown priority: {other}"))),
        }
    }
}

/// Assignment workflow status.
///
/// Transitions are unconstrained: any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    #[default]
    NotStarted,
    Pending,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    /// Kebab-case name used for storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not-started" | "not_started" => Ok(Self::NotStarted),
            "pending" => Ok(Self::Pending),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(Error::InvalidInput(format!(
                "unknown assignment status: {other}"
            ))),
        }
    }
}

/// A graded piece of coursework with a due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: AssignmentId,
    /// Assignment title
    pub title: String,
    /// Course it belongs to
    pub course: String,
    /// Calendar due date
    pub due_date: NaiveDate,
    /// Priority bucket
    pub priority: Priority,
    /// Workflow status
    pub status: AssignmentStatus,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Assignment {
    /// Materialize an assignment from validated input, assigning id and timestamp.
    #[must_use]
    pub fn from_new(new: NewAssignment) -> Self {
        Self {
            id: AssignmentId::new(),
            title: new.title,
            course: new.course,
            due_date: new.due_date,
            priority: new.priority,
            status: new.status,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Validated input for creating an assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub title: String,
    pub course: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: AssignmentStatus,
}

impl NewAssignment {
    /// Create a new assignment input with non-empty title and course.
    pub fn new(
        title: impl Into<String>,
        course: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Result<Self> {
        let title = title.into().trim().to_string();
        let course = course.into().trim().to_string();

        if title.is_empty() {
            return Err(Error::InvalidInput(
                "assignment title cannot be empty".to_string(),
            ));
        }
        if course.is_empty() {
            return Err(Error::InvalidInput(
                "assignment course cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            title,
            course,
            due_date,
            priority,
            status: AssignmentStatus::NotStarted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_assignment_id_parse() {
        let id = AssignmentId::new();
        let parsed: AssignmentId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_new_assignment_trims_and_defaults() {
        let new = NewAssignment::new(
            "  Problem set 4  ",
            "Physics",
            date(2099, 1, 1),
            Priority::High,
        )
        .unwrap();
        assert_eq!(new.title, "Problem set 4");
        assert_eq!(new.status, AssignmentStatus::NotStarted);
    }

    #[test]
    fn test_new_assignment_rejects_blank_fields() {
        assert!(NewAssignment::new(" ", "Physics", date(2099, 1, 1), Priority::Low).is_err());
        assert!(NewAssignment::new("Essay", "  ", date(2099, 1, 1), Priority::Low).is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            AssignmentStatus::NotStarted,
            AssignmentStatus::Pending,
            AssignmentStatus::InProgress,
            AssignmentStatus::Completed,
        ] {
            let parsed: AssignmentStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_parse_accepts_snake_case() {
        assert_eq!(
            "in_progress".parse::<AssignmentStatus>().unwrap(),
            AssignmentStatus::InProgress
        );
        assert!("done".parse::<AssignmentStatus>().is_err());
    }

    #[test]
    fn test_priority_round_trip() {
        for priority in [Priority::High, Priority::Medium, Priority::Low] {
            let parsed: Priority = priority.as_str().parse().unwrap();
            assert_eq!(parsed, priority);
        }
    }
}
