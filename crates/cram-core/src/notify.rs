//! Notification boundary
//!
//! Delivery itself is a platform concern: the core only decides whether a
//! notification may go out (permission + per-category settings) and when
//! (immediate or scheduled one-shot). Blocked sends log a warning and no-op
//! rather than erroring.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{NotificationSettings, Reminder, ReminderId};

/// Notification permission state, mirroring the platform boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    Granted,
    Denied,
    #[default]
    Unsupported,
}

/// Notification category used for per-type settings gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Assignments,
    Classes,
    Events,
    Reminders,
}

/// Body text for an assignment-due notification.
#[must_use]
pub fn assignment_due_body(title: &str, due_date: NaiveDate) -> String {
    format!("{title} is due on {due_date}")
}

/// Body text for an upcoming-class notification.
#[must_use]
pub fn class_reminder_body(course: &str, start_time: NaiveTime) -> String {
    format!("{course} starts at {}", start_time.format("%H:%M"))
}

/// Body text for an event-reminder notification.
#[must_use]
pub fn event_reminder_body(title: &str, date: NaiveDate, time: Option<NaiveTime>) -> String {
    time.map_or_else(
        || format!("{title} is happening on {date}"),
        |time| format!("{title} is happening on {date} at {}", time.format("%H:%M")),
    )
}

/// Something that can emit notifications.
///
/// The typed helpers carry the standard message texts; implementations may
/// override them to apply per-category gating.
pub trait Notifier {
    /// Deliver a notification now.
    fn notify(&self, title: &str, body: &str);

    /// Notify that an assignment is due soon.
    fn assignment_due(&self, title: &str, due_date: NaiveDate) {
        self.notify("Assignment Due Soon", &assignment_due_body(title, due_date));
    }

    /// Notify about an upcoming class.
    fn class_reminder(&self, course: &str, start_time: NaiveTime) {
        self.notify("Upcoming Class", &class_reminder_body(course, start_time));
    }

    /// Notify about an upcoming event.
    fn event_reminder(&self, title: &str, date: NaiveDate, time: Option<NaiveTime>) {
        self.notify("Event Reminder", &event_reminder_body(title, date, time));
    }
}

/// Platform delivery seam: actually shows a notification to the user.
pub trait NotificationDelivery {
    fn deliver(&self, title: &str, body: &str);
}

/// Gates notifications on permission state and per-category settings.
pub struct NotificationCenter<D> {
    delivery: D,
    permission: Permission,
    settings: NotificationSettings,
}

impl<D: NotificationDelivery> NotificationCenter<D> {
    pub const fn new(delivery: D, permission: Permission, settings: NotificationSettings) -> Self {
        Self {
            delivery,
            permission,
            settings,
        }
    }

    /// Record the outcome of a permission request.
    ///
    /// Granting permission also flips the master switch on, matching the
    /// settings-panel flow.
    pub fn set_permission(&mut self, permission: Permission) {
        self.permission = permission;
        if matches!(permission, Permission::Granted) {
            self.settings.enabled = true;
        }
    }

    pub const fn permission(&self) -> Permission {
        self.permission
    }

    pub const fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    fn can_send(&self) -> bool {
        match self.permission {
            Permission::Granted => self.settings.enabled,
            Permission::Denied => {
                tracing::warn!("Notification permission not granted");
                false
            }
            Permission::Unsupported => {
                tracing::warn!("Notifications not supported on this platform");
                false
            }
        }
    }

    const fn category_enabled(&self, category: NotificationCategory) -> bool {
        match category {
            NotificationCategory::Assignments => self.settings.assignments,
            NotificationCategory::Classes => self.settings.classes,
            NotificationCategory::Events => self.settings.events,
            NotificationCategory::Reminders => self.settings.reminders,
        }
    }

    fn notify_category(&self, category: NotificationCategory, title: &str, body: &str) {
        if !self.category_enabled(category) {
            tracing::debug!("Notification category disabled; skipping '{title}'");
            return;
        }
        self.notify(title, body);
    }
}

impl<D: NotificationDelivery> Notifier for NotificationCenter<D> {
    fn notify(&self, title: &str, body: &str) {
        if !self.can_send() {
            return;
        }
        self.delivery.deliver(title, body);
    }

    fn assignment_due(&self, title: &str, due_date: NaiveDate) {
        self.notify_category(
            NotificationCategory::Assignments,
            "Assignment Due Soon",
            &assignment_due_body(title, due_date),
        );
    }

    fn class_reminder(&self, course: &str, start_time: NaiveTime) {
        self.notify_category(
            NotificationCategory::Classes,
            "Upcoming Class",
            &class_reminder_body(course, start_time),
        );
    }

    fn event_reminder(&self, title: &str, date: NaiveDate, time: Option<NaiveTime>) {
        self.notify_category(
            NotificationCategory::Events,
            "Event Reminder",
            &event_reminder_body(title, date, time),
        );
    }
}

/// Cancellation handle for a scheduled one-shot notification.
pub struct ScheduledNotification {
    handle: tokio::task::JoinHandle<()>,
}

impl ScheduledNotification {
    /// Cancel the pending notification.
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Whether the notification already fired (or was cancelled).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Schedule a one-shot notification for a future moment.
///
/// Returns `None` (with a logged warning) when the moment is not in the
/// future. Must be called from within a tokio runtime.
pub fn schedule_notification<N>(
    notifier: Arc<N>,
    title: String,
    body: String,
    at: NaiveDateTime,
    now: NaiveDateTime,
) -> Option<ScheduledNotification>
where
    N: Notifier + Send + Sync + 'static,
{
    let Ok(delay) = (at - now).to_std() else {
        tracing::warn!("Cannot schedule a notification in the past");
        return None;
    };
    if delay.is_zero() {
        tracing::warn!("Cannot schedule a notification in the past");
        return None;
    }

    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        notifier.notify(&title, &body);
    });

    Some(ScheduledNotification { handle })
}

/// Owns the pending one-shot notifications for reminders.
///
/// Task handles are not serializable, so they live here keyed by reminder
/// id rather than on the persisted records.
pub struct ReminderScheduler<N> {
    notifier: Arc<N>,
    handles: HashMap<ReminderId, ScheduledNotification>,
}

impl<N> ReminderScheduler<N>
where
    N: Notifier + Send + Sync + 'static,
{
    pub fn new(notifier: N) -> Self {
        Self {
            notifier: Arc::new(notifier),
            handles: HashMap::new(),
        }
    }

    /// Schedule the one-shot notification for a newly created reminder.
    ///
    /// Returns whether a notification was actually scheduled.
    pub fn schedule(&mut self, reminder: &Reminder, now: NaiveDateTime) -> bool {
        let scheduled = schedule_notification(
            Arc::clone(&self.notifier),
            reminder.title.clone(),
            format!("Reminder: {}", reminder.title),
            reminder.moment(),
            now,
        );

        match scheduled {
            Some(handle) => {
                self.handles.insert(reminder.id, handle);
                true
            }
            None => false,
        }
    }

    /// Cancel the pending notification for a reminder, if any.
    pub fn cancel(&mut self, id: &ReminderId) -> bool {
        self.handles.remove(id).is_some_and(|handle| {
            handle.cancel();
            true
        })
    }

    /// Number of reminders with a pending notification.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.handles.len()
    }
}
