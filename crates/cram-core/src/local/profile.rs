//! User profile, notification settings and dark-mode persistence

use crate::error::{Error, Result};
use crate::models::{NotificationSettings, UserProfile};
use crate::prefs::{PreferenceStore, StorageKey};

/// Access to the per-device singleton profile and related switches.
pub struct ProfileStore<'a> {
    prefs: &'a PreferenceStore,
}

impl<'a> ProfileStore<'a> {
    /// Create a store over the given preferences.
    pub const fn new(prefs: &'a PreferenceStore) -> Self {
        Self { prefs }
    }

    /// Load the profile, defaulting when none was saved yet.
    #[must_use]
    pub fn load(&self) -> UserProfile {
        self.prefs.get(StorageKey::UserProfile, UserProfile::default())
    }

    /// Persist the profile. Returns whether the write succeeded.
    pub fn save(&self, profile: &UserProfile) -> bool {
        self.prefs.set(StorageKey::UserProfile, profile)
    }

    /// Render the profile as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.load())?)
    }

    /// Replace the profile from a previously exported payload.
    ///
    /// A structurally invalid payload is rejected without touching the
    /// stored profile.
    pub fn import_json(&self, payload: &str) -> Result<UserProfile> {
        let profile: UserProfile = serde_json::from_str(payload)
            .map_err(|error| Error::InvalidInput(format!("invalid profile payload: {error}")))?;

        if self.save(&profile) {
            Ok(profile)
        } else {
            Err(Error::Database("failed to persist profile".to_string()))
        }
    }

    /// Load notification settings, defaulting when none were saved.
    #[must_use]
    pub fn notification_settings(&self) -> NotificationSettings {
        self.prefs.get(
            StorageKey::NotificationSettings,
            NotificationSettings::default(),
        )
    }

    /// Persist notification settings. Returns whether the write succeeded.
    pub fn save_notification_settings(&self, settings: &NotificationSettings) -> bool {
        self.prefs.set(StorageKey::NotificationSettings, settings)
    }

    /// The dark-mode flag.
    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.prefs.get(StorageKey::DarkMode, false)
    }

    /// Persist the dark-mode flag. Returns whether the write succeeded.
    pub fn set_dark_mode(&self, enabled: bool) -> bool {
        self.prefs.set(StorageKey::DarkMode, &enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeMode;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_when_unset() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = ProfileStore::new(&prefs);

        assert_eq!(store.load(), UserProfile::default());
        assert_eq!(store.notification_settings(), NotificationSettings::default());
        assert!(!store.dark_mode());
    }

    #[test]
    fn save_and_load_profile() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = ProfileStore::new(&prefs);

        let profile = UserProfile {
            name: "Amina".to_string(),
            email: "amina@example.com".to_string(),
            theme: ThemeMode::Dark,
            study_goal_hours: 4,
            ..UserProfile::default()
        };

        assert!(store.save(&profile));
        assert_eq!(store.load(), profile);
    }

    #[test]
    fn export_then_import_round_trips() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = ProfileStore::new(&prefs);

        let profile = UserProfile {
            name: "Amina".to_string(),
            ..UserProfile::default()
        };
        store.save(&profile);

        let exported = store.export_json().unwrap();
        prefs.clear();

        let imported = store.import_json(&exported).unwrap();
        assert_eq!(imported, profile);
        assert_eq!(store.load(), profile);
    }

    #[test]
    fn import_rejects_invalid_payload() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = ProfileStore::new(&prefs);

        let profile = UserProfile {
            name: "Keep".to_string(),
            ..UserProfile::default()
        };
        store.save(&profile);

        assert!(store.import_json("[1, 2, 3]").is_err());
        assert!(store.import_json("{\"name\": 7}").is_err());
        assert_eq!(store.load(), profile);
    }

    #[test]
    fn notification_settings_round_trip() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = ProfileStore::new(&prefs);

        let settings = NotificationSettings {
            enabled: true,
            classes: false,
            notify_before_minutes: 15,
            ..NotificationSettings::default()
        };
        assert!(store.save_notification_settings(&settings));
        assert_eq!(store.notification_settings(), settings);
    }

    #[test]
    fn dark_mode_round_trip() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = ProfileStore::new(&prefs);

        assert!(store.set_dark_mode(true));
        assert!(store.dark_mode());
    }
}
