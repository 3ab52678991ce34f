use cram_core::local::ProfileStore;
use cram_core::notify::Notifier;
use cram_core::prefs::PreferenceStore;

use crate::commands::common::build_notifier;
use crate::error::CliError;

pub fn run_enable(prefs: &PreferenceStore) -> Result<(), CliError> {
    let store = ProfileStore::new(prefs);
    let mut settings = store.notification_settings();
    settings.enabled = true;

    if !store.save_notification_settings(&settings) {
        return Err(CliError::PreferenceWrite);
    }

    // Confirmation doubles as a test notification
    build_notifier(prefs).notify(
        "Notifications Enabled",
        "You will now receive notifications for your assignments, classes, and events.",
    );
    Ok(())
}

pub fn run_disable(prefs: &PreferenceStore) -> Result<(), CliError> {
    let store = ProfileStore::new(prefs);
    let mut settings = store.notification_settings();
    settings.enabled = false;

    if store.save_notification_settings(&settings) {
        println!("Notifications disabled");
        Ok(())
    } else {
        Err(CliError::PreferenceWrite)
    }
}

pub fn run_status(prefs: &PreferenceStore) -> Result<(), CliError> {
    let settings = ProfileStore::new(prefs).notification_settings();

    println!("enabled: {}", settings.enabled);
    println!("assignments: {}", settings.assignments);
    println!("classes: {}", settings.classes);
    println!("events: {}", settings.events);
    println!("reminders: {}", settings.reminders);
    println!("lead time: {} minutes", settings.notify_before_minutes);
    Ok(())
}
