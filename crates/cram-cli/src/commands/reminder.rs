use std::path::Path;
use std::time::Duration;

use cram_core::local::ReminderStore;
use cram_core::models::{NewReminder, ReminderId};
use cram_core::notify::ReminderScheduler;
use cram_core::prefs::PreferenceStore;

use crate::cli::PriorityArg;
use crate::commands::common::{
    build_notifier, format_reminder_lines, now_naive, parse_date, parse_id, parse_time,
};
use crate::error::CliError;

pub fn run_add(
    title: &str,
    date: &str,
    time: &str,
    priority: PriorityArg,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let store = ReminderStore::new(prefs);
    let new = NewReminder {
        title: title.to_string(),
        date: Some(parse_date(date)?),
        time: Some(parse_time(time)?),
        priority: priority.into(),
    };

    let reminder = store.add(new, now_naive())?;
    println!("{}", reminder.id);
    Ok(())
}

pub fn run_list(as_json: bool, prefs: &PreferenceStore) -> Result<(), CliError> {
    let store = ReminderStore::new(prefs);
    let reminders = store.list();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&reminders)?);
    } else {
        for line in format_reminder_lines(&reminders, now_naive()) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn run_toggle(id: &str, prefs: &PreferenceStore) -> Result<(), CliError> {
    let reminder_id: ReminderId = parse_id(id)?;
    let store = ReminderStore::new(prefs);

    let toggled = store.toggle_completed(&reminder_id)?;
    println!(
        "{}",
        if toggled.completed {
            "completed"
        } else {
            "active"
        }
    );
    Ok(())
}

pub fn run_delete(id: &str, prefs: &PreferenceStore) -> Result<(), CliError> {
    let reminder_id: ReminderId = parse_id(id)?;
    let store = ReminderStore::new(prefs);

    store.delete(&reminder_id)?;
    println!("{reminder_id}");
    Ok(())
}

/// Foreground loop: deliver one-shot notifications at each reminder's
/// moment and flag passed reminders on a fixed interval.
pub async fn run_watch(interval_secs: u64, prefs_path: &Path) -> Result<(), CliError> {
    let prefs = PreferenceStore::open(prefs_path.to_path_buf());
    let store = ReminderStore::new(&prefs);

    let mut scheduler = ReminderScheduler::new(build_notifier(&prefs));
    let now = now_naive();
    for reminder in store.active() {
        if !reminder.notified && reminder.moment() > now && scheduler.schedule(&reminder, now) {
            tracing::debug!("Scheduled notification for reminder {}", reminder.id);
        }
    }
    println!(
        "Watching reminders ({} scheduled, checking every {interval_secs}s; Ctrl-C to stop)",
        scheduler.pending()
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        ticker.tick().await;
        match store.mark_due(now_naive()) {
            Ok(newly_due) => {
                for reminder in newly_due {
                    // The one-shot already delivered; the flag flip is the
                    // durable part
                    scheduler.cancel(&reminder.id);
                    tracing::info!("Reminder due: {}", reminder.title);
                }
            }
            Err(error) => tracing::warn!("Due-reminder check failed: {error}"),
        }
    }
}
