//! File attachment model (local-only)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A unique identifier for an attachment, using UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(Uuid);

impl AttachmentId {
    /// Create a new unique attachment ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID.
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttachmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The kind of entity an attachment hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    Assignment,
    Class,
    Event,
}

impl ParentKind {
    /// Lowercase name used in storage keys
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Class => "class",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assignment" => Ok(Self::Assignment),
            "class" => Ok(Self::Class),
            "event" => Ok(Self::Event),
            other => Err(Error::InvalidInput(format!("unknown parent kind: {other}"))),
        }
    }
}

/// Composite storage key for a parent's attachment list.
#[must_use]
pub fn parent_key(kind: ParentKind, parent_id: &str) -> String {
    format!("{}_{}", kind.as_str(), parent_id)
}

/// A file attached to an assignment, class or event.
///
/// The payload is carried as an already-encoded string (data URL or
/// base64); this layer treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique attachment identifier.
    pub id: AttachmentId,
    /// Original file name.
    pub filename: String,
    /// Content MIME type.
    pub mime_type: String,
    /// Attachment size in bytes.
    pub size_bytes: i64,
    /// Encoded file content.
    pub data: String,
    /// Creation timestamp (Unix ms).
    pub created_at: i64,
}

impl Attachment {
    /// Create a new attachment record.
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: i64,
        data: impl Into<String>,
    ) -> Result<Self> {
        let filename = filename.into().trim().to_string();
        let mime_type = mime_type.into().trim().to_string();

        if filename.is_empty() {
            return Err(Error::InvalidInput(
                "attachment filename cannot be empty".to_string(),
            ));
        }
        if mime_type.is_empty() {
            return Err(Error::InvalidInput(
                "attachment mime_type cannot be empty".to_string(),
            ));
        }
        if size_bytes < 0 {
            return Err(Error::InvalidInput(
                "attachment size_bytes cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            id: AttachmentId::new(),
            filename,
            mime_type,
            size_bytes,
            data: data.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        })
    }
}
