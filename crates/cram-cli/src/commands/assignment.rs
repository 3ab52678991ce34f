use std::path::Path;

use cram_core::models::{AssignmentId, NewAssignment};
use cram_core::prefs::PreferenceStore;
use cram_core::sync::PlannerStore;

use crate::cli::{PriorityArg, StatusArg};
use crate::commands::common::{
    format_assignment_lines, open_coordinator, open_planner, parse_date, parse_id,
};
use crate::error::CliError;

pub async fn run_add(
    title: &str,
    course: &str,
    due: &str,
    priority: PriorityArg,
    db_path: &Path,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let new = NewAssignment::new(title, course, parse_date(due)?, priority.into())?;

    let mut coordinator = open_coordinator(db_path, prefs).await?;
    let assignment = coordinator.add_assignment(new).await?;

    println!("{}", assignment.id);
    Ok(())
}

pub async fn run_list(
    as_json: bool,
    search: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_planner(db_path).await?;
    let assignments = service.list_assignments().await?;
    let assignments: Vec<_> =
        cram_core::search::filter_matching(&assignments, search.unwrap_or(""))
            .into_iter()
            .cloned()
            .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&assignments)?);
    } else {
        for line in format_assignment_lines(&assignments) {
            println!("{line}");
        }
    }

    Ok(())
}

pub async fn run_status(
    id: &str,
    status: StatusArg,
    db_path: &Path,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let assignment_id: AssignmentId = parse_id(id)?;
    let status = status.into();

    let mut coordinator = open_coordinator(db_path, prefs).await?;
    coordinator
        .update_assignment_status(&assignment_id, status)
        .await?;

    println!("Assignment status changed to {status}");
    Ok(())
}
