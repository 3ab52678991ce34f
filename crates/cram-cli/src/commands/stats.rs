use std::path::Path;

use cram_core::sync::PlannerStore;
use cram_core::views;
use serde::Serialize;

use crate::commands::common::{open_planner, today};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct StatsOutput {
    completion_rate: u32,
    completed: usize,
    in_progress: usize,
    not_started: usize,
    overdue: usize,
    high: usize,
    medium: usize,
    low: usize,
    due_today: usize,
    due_this_week: usize,
    due_next_week: usize,
    due_later: usize,
}

pub async fn run_stats(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let service = open_planner(db_path).await?;
    let assignments = service.list_assignments().await?;
    let today = today();

    let status = views::status_counts(&assignments, today);
    let priority = views::priority_counts(&assignments);
    let due = views::due_bucket_counts(&assignments, today);
    let rate = views::completion_rate(&assignments);

    if as_json {
        let output = StatsOutput {
            completion_rate: rate,
            completed: status.completed,
            in_progress: status.in_progress,
            not_started: status.not_started,
            overdue: status.overdue,
            high: priority.high,
            medium: priority.medium,
            low: priority.low,
            due_today: due.today,
            due_this_week: due.this_week,
            due_next_week: due.next_week,
            due_later: due.future,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Assignments: {}", assignments.len());
    println!("Completion rate: {rate}%");
    println!(
        "Status: {} completed, {} in progress, {} not started, {} overdue",
        status.completed, status.in_progress, status.not_started, status.overdue
    );
    println!(
        "Priority: {} high, {} medium, {} low",
        priority.high, priority.medium, priority.low
    );
    println!(
        "Due: {} overdue, {} today, {} this week, {} next week, {} later",
        due.overdue, due.today, due.this_week, due.next_week, due.future
    );
    Ok(())
}
