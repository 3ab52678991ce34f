use std::path::Path;

use cram_core::calendar::{google_calendar_url, render_calendar, CalendarEntry};
use cram_core::models::EventId;
use cram_core::sync::PlannerStore;

use crate::commands::common::{open_planner, parse_id, write_or_print};
use crate::error::CliError;

pub async fn run_ics(
    include_assignments: bool,
    output_path: Option<&Path>,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_planner(db_path).await?;

    let events = service.list_events().await?;
    let mut entries: Vec<CalendarEntry> = events.iter().map(CalendarEntry::from).collect();

    if include_assignments {
        let assignments = service.list_assignments().await?;
        entries.extend(assignments.iter().map(CalendarEntry::from));
    }

    if entries.is_empty() {
        return Err(CliError::NothingToExport);
    }

    let rendered = render_calendar(&entries);
    write_or_print(&rendered, output_path)
}

pub async fn run_google(id: &str, db_path: &Path) -> Result<(), CliError> {
    let event_id: EventId = parse_id(id)?;
    let service = open_planner(db_path).await?;

    let events = service.list_events().await?;
    let event = events
        .iter()
        .find(|event| event.id == event_id)
        .ok_or_else(|| cram_core::Error::NotFound(event_id.to_string()))?;

    println!("{}", google_calendar_url(&CalendarEntry::from(event)));
    Ok(())
}
