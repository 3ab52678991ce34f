use std::path::Path;

use cram_core::models::{ClassSessionId, NewClassSession};
use cram_core::prefs::PreferenceStore;
use cram_core::sync::PlannerStore;

use crate::cli::WeekdayArg;
use crate::commands::common::{
    format_class_lines, open_coordinator, open_planner, parse_id, parse_time, today,
};
use crate::error::CliError;

#[allow(clippy::too_many_arguments)]
pub async fn run_add(
    course: &str,
    day: WeekdayArg,
    start: &str,
    end: &str,
    location: &str,
    instructor: &str,
    db_path: &Path,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let new = NewClassSession::new(
        course,
        day.into(),
        parse_time(start)?,
        parse_time(end)?,
        location,
        instructor,
    )?;

    let mut coordinator = open_coordinator(db_path, prefs).await?;
    let session = coordinator.add_class_session(new).await?;

    println!("{}", session.id);
    Ok(())
}

pub async fn run_list(
    as_json: bool,
    search: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_planner(db_path).await?;
    let sessions = service.list_class_sessions().await?;
    let sessions: Vec<_> = cram_core::search::filter_matching(&sessions, search.unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
    } else {
        for line in format_class_lines(&sessions) {
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
    let session_id: ClassSessionId = parse_id(id)?;

    let mut coordinator = open_coordinator(db_path, prefs).await?;
    coordinator.delete_class_session(&session_id, today()).await?;

    println!("{session_id}");
    Ok(())
}
