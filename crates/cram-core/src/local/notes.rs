//! Shared-notes store over the local preference store

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Note, NoteId};
use crate::prefs::{PreferenceStore, StorageKey};

/// CRUD and JSON import/export over the locally-persisted note list.
pub struct NoteStore<'a> {
    prefs: &'a PreferenceStore,
}

// Used only to validate imported payloads without trusting their shape.
#[derive(Deserialize)]
struct ImportedNote {
    id: NoteId,
    title: String,
    #[serde(default)]
    content: String,
    created_at: i64,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl<'a> NoteStore<'a> {
    /// Create a store over the given preferences.
    pub const fn new(prefs: &'a PreferenceStore) -> Self {
        Self { prefs }
    }

    /// All notes, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<Note> {
        self.prefs.get(StorageKey::Notes, Vec::new())
    }

    /// Create a note with a non-empty title.
    pub fn add(&self, title: &str, content: &str) -> Result<Note> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput(
                "note title cannot be empty".to_string(),
            ));
        }

        let note = Note::new(title, content.trim());
        let mut notes = self.list();
        notes.push(note.clone());
        self.save(&notes)?;

        Ok(note)
    }

    /// Update a note's title and content, bumping `updated_at`.
    pub fn update(&self, id: &NoteId, title: &str, content: &str) -> Result<Note> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput(
                "note title cannot be empty".to_string(),
            ));
        }

        let mut notes = self.list();
        let note = notes
            .iter_mut()
            .find(|note| note.id == *id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        note.title = title.to_string();
        note.content = content.trim().to_string();
        note.updated_at = chrono::Utc::now().timestamp_millis();
        let updated = note.clone();

        self.save(&notes)?;
        Ok(updated)
    }

    /// Delete a note.
    pub fn delete(&self, id: &NoteId) -> Result<()> {
        let mut notes = self.list();
        let before = notes.len();
        notes.retain(|note| note.id != *id);

        if notes.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }

        self.save(&notes)
    }

    /// Render the whole note list as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }

    /// Replace the note list with a previously exported payload.
    ///
    /// The whole import is rejected unless every record carries an id, a
    /// non-empty title and a creation timestamp; on rejection the stored
    /// list is untouched.
    pub fn import_json(&self, payload: &str) -> Result<Vec<Note>> {
        let imported: Vec<ImportedNote> = serde_json::from_str(payload)
            .map_err(|error| Error::InvalidInput(format!("invalid notes payload: {error}")))?;

        if imported.iter().any(|note| note.title.trim().is_empty()) {
            return Err(Error::InvalidInput(
                "invalid notes payload: every note needs a title".to_string(),
            ));
        }

        let notes: Vec<Note> = imported
            .into_iter()
            .map(|note| Note {
                id: note.id,
                title: note.title,
                content: note.content,
                created_at: note.created_at,
                updated_at: note.updated_at.unwrap_or(note.created_at),
            })
            .collect();

        self.save(&notes)?;
        Ok(notes)
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        if self.prefs.set(StorageKey::Notes, &notes) {
            Ok(())
        } else {
            Err(Error::Database("failed to persist note list".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn add_update_delete_round_trip() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = NoteStore::new(&prefs);

        let note = store.add("Week 3 recap", "Covered eigenvalues").unwrap();
        assert_eq!(store.list().len(), 1);

        let updated = store
            .update(&note.id, "Week 3 recap", "Covered eigenvalues and kernels")
            .unwrap();
        assert!(updated.updated_at >= note.updated_at);
        assert_eq!(updated.content, "Covered eigenvalues and kernels");

        store.delete(&note.id).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn add_rejects_blank_title() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = NoteStore::new(&prefs);

        assert!(store.add("   ", "body").is_err());
        assert!(store.list().is_empty());
    }

    #[test]
    fn export_then_import_reproduces_list() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = NoteStore::new(&prefs);

        store.add("First", "alpha").unwrap();
        store.add("Second", "beta").unwrap();
        let original = store.list();

        let exported = store.export_json().unwrap();

        // Wipe and re-import into the same store
        prefs.clear();
        assert!(store.list().is_empty());

        let imported = store.import_json(&exported).unwrap();
        assert_eq!(imported, original);
        assert_eq!(store.list(), original);
    }

    #[test]
    fn import_rejects_malformed_payloads_without_touching_state() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = NoteStore::new(&prefs);

        let existing = store.add("Keep me", "safe").unwrap();

        // Not an array
        assert!(store.import_json("{}").is_err());
        // Missing created_at
        let missing_field = r#"[{"id":"018f4e9e-1111-7000-8000-000000000000","title":"x"}]"#;
        assert!(store.import_json(missing_field).is_err());
        // Blank title
        let blank_title = format!(
            r#"[{{"id":"{}","title":"  ","created_at":1}}]"#,
            NoteId::new()
        );
        assert!(store.import_json(&blank_title).is_err());

        assert_eq!(store.list(), vec![existing]);
    }

    #[test]
    fn import_defaults_updated_at_to_created_at() {
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
        let store = NoteStore::new(&prefs);

        let payload = format!(
            r#"[{{"id":"{}","title":"old export","created_at":42}}]"#,
            NoteId::new()
        );
        let imported = store.import_json(&payload).unwrap();
        assert_eq!(imported[0].updated_at, 42);
    }
}
