use std::path::Path;

use cram_core::prefs::PreferenceStore;

use crate::commands::common::{open_coordinator, today};
use crate::error::CliError;

pub async fn run_refresh(db_path: &Path, prefs: &PreferenceStore) -> Result<(), CliError> {
    let mut coordinator = open_coordinator(db_path, prefs).await?;
    coordinator.refresh_all(today()).await?;

    let data = coordinator.data();
    println!(
        "Data loaded successfully: {} classes, {} assignments, {} events",
        data.class_sessions.len(),
        data.assignments.len(),
        data.events.len()
    );
    Ok(())
}
