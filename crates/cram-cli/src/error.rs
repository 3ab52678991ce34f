use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] cram_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),
    #[error("Invalid ID: {0}")]
    InvalidId(String),
    #[error("No notes to export")]
    NoNotesToExport,
    #[error("Nothing to export")]
    NothingToExport,
    #[error("Failed to persist preferences")]
    PreferenceWrite,
}
