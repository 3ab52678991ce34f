use std::path::Path;

use cram_core::models::{EventId, NewEvent};
use cram_core::prefs::PreferenceStore;
use cram_core::sync::PlannerStore;

use crate::cli::EventTypeArg;
use crate::commands::common::{
    format_event_lines, open_coordinator, open_planner, parse_date, parse_id, parse_time, today,
};
use crate::error::CliError;

#[allow(clippy::too_many_arguments)]
pub async fn run_add(
    title: &str,
    date: &str,
    event_type: EventTypeArg,
    description: Option<String>,
    location: Option<String>,
    time: Option<&str>,
    db_path: &Path,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let time = time.map(parse_time).transpose()?;
    let new = NewEvent::new(
        title,
        parse_date(date)?,
        event_type.into(),
        description,
        location,
        time,
    )?;

    let mut coordinator = open_coordinator(db_path, prefs).await?;
    let event = coordinator.add_event(new).await?;

    println!("{}", event.id);
    Ok(())
}

pub async fn run_list(
    as_json: bool,
    search: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_planner(db_path).await?;
    let events = service.list_events().await?;
    let events: Vec<_> = cram_core::search::filter_matching(&events, search.unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        for line in format_event_lines(&events) {
            println!("{line}");
        }
    }

    Ok(())
}

pub async fn run_delete(
    id: &str,
    db_path: &Path,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let event_id: EventId = parse_id(id)?;

    let mut coordinator = open_coordinator(db_path, prefs).await?;
    coordinator.delete_event(&event_id, today()).await?;

    println!("{event_id}");
    Ok(())
}
