use std::path::Path;

use cram_core::local::ProfileStore;
use cram_core::prefs::PreferenceStore;

use crate::cli::ThemeArg;
use crate::commands::common::write_or_print;
use crate::error::CliError;

pub fn run_show(prefs: &PreferenceStore) -> Result<(), CliError> {
    let store = ProfileStore::new(prefs);
    let profile = store.load();

    println!("name: {}", profile.name);
    println!("email: {}", profile.email);
    println!("theme: {}", serde_json::to_string(&profile.theme)?.trim_matches('"'));
    println!("notifications: {}", profile.notifications);
    println!("study goal: {}h/day", profile.study_goal_hours);
    println!("dark mode: {}", store.dark_mode());
    Ok(())
}

pub fn run_set(
    name: Option<String>,
    email: Option<String>,
    theme: Option<ThemeArg>,
    study_goal_hours: Option<u32>,
    notifications: Option<bool>,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let store = ProfileStore::new(prefs);
    let mut profile = store.load();

    if let Some(name) = name {
        profile.name = name.trim().to_string();
    }
    if let Some(email) = email {
        profile.email = email.trim().to_string();
    }
    if let Some(theme) = theme {
        profile.theme = theme.into();
        store.set_dark_mode(matches!(theme, ThemeArg::Dark));
    }
    if let Some(hours) = study_goal_hours {
        profile.study_goal_hours = hours;
    }
    if let Some(notifications) = notifications {
        profile.notifications = notifications;
    }

    if store.save(&profile) {
        println!("Profile saved");
        Ok(())
    } else {
        Err(CliError::PreferenceWrite)
    }
}

pub fn run_export(output_path: Option<&Path>, prefs: &PreferenceStore) -> Result<(), CliError> {
    let store = ProfileStore::new(prefs);
    let rendered = store.export_json()?;
    write_or_print(&rendered, output_path)
}

pub fn run_import(input_path: &Path, prefs: &PreferenceStore) -> Result<(), CliError> {
    let payload = std::fs::read_to_string(input_path)?;
    let store = ProfileStore::new(prefs);

    let imported = store.import_json(&payload)?;
    println!("Imported profile for '{}'", imported.name);
    Ok(())
}
