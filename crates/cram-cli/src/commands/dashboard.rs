use std::path::Path;

use cram_core::prefs::PreferenceStore;
use cram_core::views;

use crate::commands::common::{
    format_assignment_lines, format_class_lines, format_event_lines, open_coordinator, today,
};
use crate::error::CliError;

pub async fn run_dashboard(db_path: &Path, prefs: &PreferenceStore) -> Result<(), CliError> {
    let mut coordinator = open_coordinator(db_path, prefs).await?;
    let today = today();
    coordinator.refresh_all(today).await?;
    let data = coordinator.data();

    println!("Today's classes");
    let todays: Vec<_> = views::today_classes(&data.class_sessions, today)
        .into_iter()
        .cloned()
        .collect();
    if todays.is_empty() {
        println!("  (none)");
    } else {
        for line in format_class_lines(&todays) {
            println!("  {line}");
        }
    }

    println!("\nUpcoming assignments");
    let upcoming: Vec<_> = views::upcoming_assignments(&data.assignments, today)
        .into_iter()
        .cloned()
        .collect();
    if upcoming.is_empty() {
        println!("  (none)");
    } else {
        for line in format_assignment_lines(&upcoming) {
            println!("  {line}");
        }
    }

    println!("\nUpcoming events");
    let events: Vec<_> = views::upcoming_events(&data.events, today)
        .into_iter()
        .cloned()
        .collect();
    if events.is_empty() {
        println!("  (none)");
    } else {
        for line in format_event_lines(&events) {
            println!("  {line}");
        }
    }

    println!(
        "\nCompletion rate: {}%",
        views::completion_rate(&data.assignments)
    );
    Ok(())
}
