//! Attachment store over the local preference store

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::{parent_key, Attachment, AttachmentId, ParentKind};
use crate::prefs::{PreferenceStore, StorageKey};

type AttachmentMap = BTreeMap<String, Vec<Attachment>>;

/// Per-parent attachment lists, all stored under one map keyed by
/// `"<parent_type>_<parent_id>"`.
pub struct AttachmentStore<'a> {
    prefs: &'a PreferenceStore,
}

impl<'a> AttachmentStore<'a> {
    /// Create a store over the given preferences.
    pub const fn new(prefs: &'a PreferenceStore) -> Self {
        Self { prefs }
    }

    /// Attachments for one parent entity.
    #[must_use]
    pub fn list_for(&self, kind: ParentKind, parent_id: &str) -> Vec<Attachment> {
        self.read_map()
            .remove(&parent_key(kind, parent_id))
            .unwrap_or_default()
    }

    /// Attach a file to a parent entity.
    pub fn add_for(
        &self,
        kind: ParentKind,
        parent_id: &str,
        attachment: Attachment,
    ) -> Result<Attachment> {
        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            return Err(Error::InvalidInput(
                "attachment parent id cannot be empty".to_string(),
            ));
        }

        let mut map = self.read_map();
        map.entry(parent_key(kind, parent_id))
            .or_default()
            .push(attachment.clone());
        self.save(&map)?;

        Ok(attachment)
    }

    /// Remove one attachment from a parent's list.
    pub fn delete_for(&self, kind: ParentKind, parent_id: &str, id: &AttachmentId) -> Result<()> {
        let key = parent_key(kind, parent_id);
        let mut map = self.read_map();
        let attachments = map
            .get_mut(&key)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let before = attachments.len();
        attachments.retain(|attachment| attachment.id != *id);
        if attachments.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }
        if attachments.is_empty() {
            map.remove(&key);
        }

        self.save(&map)
    }

    /// Total stored bytes for one parent entity.
    #[must_use]
    pub fn total_size_for(&self, kind: ParentKind, parent_id: &str) -> i64 {
        self.list_for(kind, parent_id)
            .iter()
            .map(|attachment| attachment.size_bytes)
            .sum()
    }

    fn read_map(&self) -> AttachmentMap {
        self.prefs.get(StorageKey::Attachments, AttachmentMap::new())
    }

    fn save(&self, map: &AttachmentMap) -> Result<()> {
        if self.prefs.set(StorageKey::Attachments, map) {
            Ok(())
        } else {
            Err(Error::Database(
                "failed to persist attachment map".to_string(),
            ))
        }
    }
}
