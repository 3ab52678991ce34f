//! Derived dashboard views
//!
//! Pure calculators over the current collections plus an explicit `today`.
//! Nothing here is persisted or cached; callers recompute whenever they
//! render.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{Assignment, AssignmentStatus, ClassSession, Event, Weekday};

/// Number of upcoming items shown on the dashboard.
const UPCOMING_LIMIT: usize = 3;

/// Class sessions that recur on today's weekday.
#[must_use]
pub fn today_classes<'a>(classes: &'a [ClassSession], today: NaiveDate) -> Vec<&'a ClassSession> {
    let weekday = Weekday::from_date(today);
    classes
        .iter()
        .filter(|session| session.day == weekday)
        .collect()
}

/// Events dated exactly today.
#[must_use]
pub fn today_events<'a>(events: &'a [Event], today: NaiveDate) -> Vec<&'a Event> {
    events.iter().filter(|event| event.date == today).collect()
}

/// Assignments due exactly today.
#[must_use]
pub fn assignments_due_today<'a>(
    assignments: &'a [Assignment],
    today: NaiveDate,
) -> Vec<&'a Assignment> {
    assignments
        .iter()
        .filter(|assignment| assignment.due_date == today)
        .collect()
}

/// The next few assignments due strictly after today, soonest first.
#[must_use]
pub fn upcoming_assignments<'a>(
    assignments: &'a [Assignment],
    today: NaiveDate,
) -> Vec<&'a Assignment> {
    let mut upcoming: Vec<&Assignment> = assignments
        .iter()
        .filter(|assignment| assignment.due_date > today)
        .collect();
    upcoming.sort_by_key(|assignment| assignment.due_date);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

/// The next few events dated strictly after today, soonest first.
#[must_use]
pub fn upcoming_events<'a>(events: &'a [Event], today: NaiveDate) -> Vec<&'a Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|event| event.date > today).collect();
    upcoming.sort_by_key(|event| event.date);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

/// Assignment counts partitioned by effective status.
///
/// An incomplete assignment due before today counts as overdue regardless
/// of its raw status; every assignment lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub overdue: usize,
}

impl StatusCounts {
    /// Sum of all buckets; equals the input length.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.completed + self.in_progress + self.not_started + self.overdue
    }
}

/// Partition assignments into status buckets.
#[must_use]
pub fn status_counts(assignments: &[Assignment], today: NaiveDate) -> StatusCounts {
    let mut counts = StatusCounts::default();

    for assignment in assignments {
        if !assignment.status.is_completed() && assignment.due_date < today {
            counts.overdue += 1;
            continue;
        }
        match assignment.status {
            AssignmentStatus::Completed => counts.completed += 1,
            AssignmentStatus::InProgress => counts.in_progress += 1,
            // Pending work has not been started yet
            AssignmentStatus::NotStarted | AssignmentStatus::Pending => counts.not_started += 1,
        }
    }

    counts
}

/// Assignment counts partitioned by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Partition assignments into priority buckets.
#[must_use]
pub fn priority_counts(assignments: &[Assignment]) -> PriorityCounts {
    let mut counts = PriorityCounts::default();

    for assignment in assignments {
        match assignment.priority {
            crate::models::Priority::High => counts.high += 1,
            crate::models::Priority::Medium => counts.medium += 1,
            crate::models::Priority::Low => counts.low += 1,
        }
    }

    counts
}

/// Assignment counts partitioned by due-date proximity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueBucketCounts {
    pub overdue: usize,
    pub today: usize,
    pub this_week: usize,
    pub next_week: usize,
    pub future: usize,
}

/// Partition assignments into due-date buckets.
///
/// "This week" runs through the upcoming Sunday; "next week" covers the
/// seven days after it. Completed assignments due in the past are not
/// overdue: they fall through to the date buckets.
#[must_use]
pub fn due_bucket_counts(assignments: &[Assignment], today: NaiveDate) -> DueBucketCounts {
    let mut counts = DueBucketCounts::default();

    let days_to_sunday = 7 - i64::from(today.weekday().num_days_from_sunday());
    let this_week_end = today + Duration::days(days_to_sunday);
    let next_week_end = this_week_end + Duration::days(7);

    for assignment in assignments {
        let due = assignment.due_date;
        if due < today && !assignment.status.is_completed() {
            counts.overdue += 1;
        } else if due == today {
            counts.today += 1;
        } else if due <= this_week_end {
            counts.this_week += 1;
        } else if due <= next_week_end {
            counts.next_week += 1;
        } else {
            counts.future += 1;
        }
    }

    counts
}

/// Percentage of assignments completed, rounded; 0 for an empty list.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn completion_rate(assignments: &[Assignment]) -> u32 {
    if assignments.is_empty() {
        return 0;
    }

    let completed = assignments
        .iter()
        .filter(|assignment| assignment.status.is_completed())
        .count();

    ((completed as f64 / assignments.len() as f64) * 100.0).round() as u32
}
