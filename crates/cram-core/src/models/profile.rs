//! User profile and notification settings models (local-only)

use serde::{Deserialize, Serialize};

/// Theme mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
    /// Follow system preference
    System,
}

/// Per-device user profile (singleton).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Encoded avatar image (opaque data URL)
    pub avatar: String,
    /// Contact email
    pub email: String,
    /// Theme preference
    pub theme: ThemeMode,
    /// Master notification toggle shown in the profile
    pub notifications: bool,
    /// Daily study goal in hours
    pub study_goal_hours: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            avatar: String::new(),
            email: String::new(),
            theme: ThemeMode::Light,
            notifications: true,
            study_goal_hours: 2,
        }
    }
}

/// Per-category notification settings plus lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Master switch; flips on once permission is granted
    pub enabled: bool,
    /// Notify about assignments
    pub assignments: bool,
    /// Notify about class sessions
    pub classes: bool,
    /// Notify about events
    pub events: bool,
    /// Notify about reminders
    pub reminders: bool,
    /// Lead time before the scheduled moment, in minutes
    pub notify_before_minutes: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            assignments: true,
            classes: true,
            events: true,
            reminders: true,
            notify_before_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_default() {
        let profile = UserProfile::default();
        assert_eq!(profile.theme, ThemeMode::Light);
        assert_eq!(profile.study_goal_hours, 2);
        assert!(profile.notifications);
    }

    #[test]
    fn test_notification_settings_default() {
        let settings = NotificationSettings::default();
        assert!(!settings.enabled);
        assert!(settings.assignments);
        assert_eq!(settings.notify_before_minutes, 30);
    }
}
