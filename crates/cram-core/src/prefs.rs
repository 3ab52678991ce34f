//! Local preference store
//!
//! A typed key/value wrapper over one on-device JSON file. Reads fall back
//! to a caller-supplied default and writes report success with a flag;
//! storage and serialization failures are logged and never propagate to
//! the caller.
//!
//! Single-process, last write wins. The file is re-read on every
//! operation, so keys written by someone else are preserved, but there is
//! no change notification.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The fixed namespace of locally-persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Dark-mode flag
    DarkMode,
    /// `UserProfile` singleton
    UserProfile,
    /// Reminder list
    Reminders,
    /// Note list
    Notes,
    /// Map from `"<parent_type>_<parent_id>"` to attachment list
    Attachments,
    /// `NotificationSettings`
    NotificationSettings,
}

impl StorageKey {
    /// Stable name used in the store file
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DarkMode => "dark_mode",
            Self::UserProfile => "user_profile",
            Self::Reminders => "reminders",
            Self::Notes => "notes",
            Self::Attachments => "attachments",
            Self::NotificationSettings => "notification_settings",
        }
    }
}

/// JSON-file-backed preference store.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Create a store over the given file path.
    ///
    /// The file (and its parent directory) is created lazily on the first
    /// write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value, falling back to `default` when the key is absent or
    /// the stored value fails to deserialize.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        let Some(value) = self.read_map().remove(key.as_str()) else {
            return default;
        };

        match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!("Failed to decode stored value for {}: {error}", key.as_str());
                default
            }
        }
    }

    /// Serialize and persist a value. Returns whether the write succeeded.
    pub fn set<T: Serialize>(&self, key: StorageKey, value: &T) -> bool {
        let serialized = match serde_json::to_value(value) {
            Ok(serialized) => serialized,
            Err(error) => {
                tracing::warn!("Failed to serialize value for {}: {error}", key.as_str());
                return false;
            }
        };

        let mut map = self.read_map();
        map.insert(key.as_str().to_string(), serialized);
        self.write_map(&map)
    }

    /// Remove a key. Returns whether the write succeeded.
    pub fn remove(&self, key: StorageKey) -> bool {
        let mut map = self.read_map();
        map.remove(key.as_str());
        self.write_map(&map)
    }

    /// Remove every stored value. Returns whether the write succeeded.
    pub fn clear(&self) -> bool {
        self.write_map(&BTreeMap::new())
    }

    fn read_map(&self) -> BTreeMap<String, Value> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(error) => {
                tracing::warn!("Failed to read preference store {}: {error}", self.path.display());
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(error) => {
                tracing::warn!(
                    "Preference store {} is not valid JSON: {error}",
                    self.path.display()
                );
                BTreeMap::new()
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, Value>) -> bool {
        if let Some(parent) = self.path.parent() {
            if let Err(error) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create preference directory: {error}");
                return false;
            }
        }

        let serialized = match serde_json::to_string_pretty(map) {
            Ok(serialized) => serialized,
            Err(error) => {
                tracing::warn!("Failed to serialize preference store: {error}");
                return false;
            }
        };

        match std::fs::write(&self.path, serialized) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(
                    "Failed to write preference store {}: {error}",
                    self.path.display()
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> PreferenceStore {
        PreferenceStore::open(dir.path().join("prefs.json"))
    }

    #[test]
    fn get_returns_default_when_unset() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.get(StorageKey::DarkMode, false));
        assert_eq!(
            store.get(StorageKey::Notes, Vec::<String>::new()),
            Vec::<String>::new()
        );
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.set(StorageKey::DarkMode, &true));
        assert!(store.get(StorageKey::DarkMode, false));

        let profile = UserProfile {
            name: "Amina".to_string(),
            ..UserProfile::default()
        };
        assert!(store.set(StorageKey::UserProfile, &profile));
        let loaded: UserProfile = store.get(StorageKey::UserProfile, UserProfile::default());
        assert_eq!(loaded, profile);
    }

    #[test]
    fn set_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.set(StorageKey::DarkMode, &true);
        store.set(StorageKey::Notes, &vec!["keep".to_string()]);

        assert!(store.get(StorageKey::DarkMode, false));
        assert_eq!(
            store.get(StorageKey::Notes, Vec::<String>::new()),
            vec!["keep".to_string()]
        );
    }

    #[test]
    fn get_falls_back_on_type_mismatch() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.set(StorageKey::DarkMode, &"not a bool");
        assert!(!store.get(StorageKey::DarkMode, false));
    }

    #[test]
    fn get_survives_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = PreferenceStore::open(&path);
        assert!(store.get(StorageKey::DarkMode, true));
        // A write through the corrupt file replaces it
        assert!(store.set(StorageKey::DarkMode, &false));
        assert!(!store.get(StorageKey::DarkMode, true));
    }

    #[test]
    fn remove_and_clear() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.set(StorageKey::DarkMode, &true);
        store.set(StorageKey::Notes, &vec!["a".to_string()]);

        assert!(store.remove(StorageKey::DarkMode));
        assert!(!store.get(StorageKey::DarkMode, false));
        assert_eq!(
            store.get(StorageKey::Notes, Vec::<String>::new()),
            vec!["a".to_string()]
        );

        assert!(store.clear());
        assert_eq!(store.get(StorageKey::Notes, Vec::<String>::new()), Vec::<String>::new());
    }
}
