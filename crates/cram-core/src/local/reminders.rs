//! Reminder store over the local preference store

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::models::{NewReminder, Reminder, ReminderId};
use crate::prefs::{PreferenceStore, StorageKey};

/// CRUD over the locally-persisted reminder list.
pub struct ReminderStore<'a> {
    prefs: &'a PreferenceStore,
}

impl<'a> ReminderStore<'a> {
    /// Create a store over the given preferences.
    pub const fn new(prefs: &'a PreferenceStore) -> Self {
        Self { prefs }
    }

    /// All reminders, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<Reminder> {
        self.prefs.get(StorageKey::Reminders, Vec::new())
    }

    /// Reminders not yet completed.
    #[must_use]
    pub fn active(&self) -> Vec<Reminder> {
        self.list()
            .into_iter()
            .filter(|reminder| !reminder.completed)
            .collect()
    }

    /// Create a reminder due at a future moment.
    ///
    /// Rejects an empty title, a missing date, a missing time, and a
    /// moment that is not after `now` — each with a message naming the
    /// failed constraint.
    pub fn add(&self, new: NewReminder, now: NaiveDateTime) -> Result<Reminder> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::InvalidInput(
                "reminder title cannot be empty".to_string(),
            ));
        }
        let Some(date) = new.date else {
            return Err(Error::InvalidInput(
                "reminder date must be set".to_string(),
            ));
        };
        let Some(time) = new.time else {
            return Err(Error::InvalidInput(
                "reminder time must be set".to_string(),
            ));
        };
        if date.and_time(time) <= now {
            return Err(Error::InvalidInput(
                "reminder moment cannot be in the past".to_string(),
            ));
        }

        let reminder = Reminder {
            id: ReminderId::new(),
            title,
            date,
            time,
            priority: new.priority,
            completed: false,
            notified: false,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let mut reminders = self.list();
        reminders.push(reminder.clone());
        self.save(&reminders)?;

        Ok(reminder)
    }

    /// Toggle a reminder between active and completed.
    pub fn toggle_completed(&self, id: &ReminderId) -> Result<Reminder> {
        let mut reminders = self.list();
        let reminder = reminders
            .iter_mut()
            .find(|reminder| reminder.id == *id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        reminder.completed = !reminder.completed;
        let toggled = reminder.clone();
        self.save(&reminders)?;

        Ok(toggled)
    }

    /// Delete a reminder.
    ///
    /// Callers owning a scheduled notification must cancel it first; this
    /// store only removes the record.
    pub fn delete(&self, id: &ReminderId) -> Result<()> {
        let mut reminders = self.list();
        let before = reminders.len();
        reminders.retain(|reminder| reminder.id != *id);

        if reminders.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }

        self.save(&reminders)
    }

    /// Flag reminders whose moment has passed and were not yet flagged.
    ///
    /// Works on a copy and replaces the whole list, then returns the
    /// newly-due reminders. Completed reminders are left alone.
    pub fn mark_due(&self, now: NaiveDateTime) -> Result<Vec<Reminder>> {
        let mut reminders = self.list();
        let mut newly_due = Vec::new();

        for reminder in &mut reminders {
            if !reminder.completed && !reminder.notified && reminder.moment() <= now {
                reminder.notified = true;
                newly_due.push(reminder.clone());
            }
        }

        if !newly_due.is_empty() {
            self.save(&reminders)?;
        }

        Ok(newly_due)
    }

    fn save(&self, reminders: &[Reminder]) -> Result<()> {
        if self.prefs.set(StorageKey::Reminders, &reminders) {
            Ok(())
        } else {
            Err(Error::Database(
                "failed to persist reminder list".to_string(),
            ))
        }
    }
}
