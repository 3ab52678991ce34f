use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use cram_core::db::SyncConfig;
use cram_core::models::{Assignment, ClassSession, Event, Note, Reminder};
use cram_core::notify::{NotificationCenter, NotificationDelivery, Permission};
use cram_core::prefs::PreferenceStore;
use cram_core::services::PlannerService;
use cram_core::sync::SyncCoordinator;

use crate::error::CliError;

/// Prints notifications to the terminal.
pub struct StdoutDelivery;

impl NotificationDelivery for StdoutDelivery {
    fn deliver(&self, title: &str, body: &str) {
        println!("[{title}] {body}");
    }
}

pub type CliNotifier = NotificationCenter<StdoutDelivery>;

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("CRAM_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cram")
        .join("cram.db")
}

pub fn resolve_prefs_path(cli_prefs_path: Option<PathBuf>) -> PathBuf {
    cli_prefs_path
        .or_else(|| env::var_os("CRAM_PREFS_PATH").map(PathBuf::from))
        .unwrap_or_else(default_prefs_path)
}

fn default_prefs_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cram")
        .join("prefs.json")
}

fn sync_config_from_env() -> Option<SyncConfig> {
    let url = env::var("TURSO_DATABASE_URL").ok()?;
    let auth_token = env::var("TURSO_AUTH_TOKEN").ok()?;

    if url.is_empty() || auth_token.is_empty() {
        return None;
    }

    Some(SyncConfig::new(url, auth_token))
}

pub async fn open_planner(db_path: &Path) -> Result<PlannerService, CliError> {
    if let Some(sync_config) = sync_config_from_env() {
        Ok(PlannerService::open_sync_path(db_path.to_path_buf(), sync_config).await?)
    } else {
        Ok(PlannerService::open_local_path(db_path.to_path_buf()).await?)
    }
}

pub fn open_prefs(prefs_path: &Path) -> PreferenceStore {
    PreferenceStore::open(prefs_path.to_path_buf())
}

/// Build the terminal notifier from the stored notification settings.
pub fn build_notifier(prefs: &PreferenceStore) -> CliNotifier {
    let settings = cram_core::local::ProfileStore::new(prefs).notification_settings();
    NotificationCenter::new(StdoutDelivery, Permission::Granted, settings)
}

pub async fn open_coordinator(
    db_path: &Path,
    prefs: &PreferenceStore,
) -> Result<SyncCoordinator<PlannerService, CliNotifier>, CliError> {
    let service = open_planner(db_path).await?;
    Ok(SyncCoordinator::new(service, build_notifier(prefs)))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_naive() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidDate(value.to_string()))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, CliError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| CliError::InvalidTime(value.to_string()))
}

pub fn parse_id<T>(value: &str) -> Result<T, CliError>
where
    T: FromStr,
{
    value
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidId(value.to_string()))
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn format_class_lines(sessions: &[ClassSession]) -> Vec<String> {
    sessions
        .iter()
        .map(|session| {
            format!(
                "{:<13}  {:<9}  {}-{}  {:<24}  {}",
                short_id(&session.id.to_string()),
                session.day.to_string(),
                session.start_time.format("%H:%M"),
                session.end_time.format("%H:%M"),
                session.course,
                session.location
            )
        })
        .collect()
}

pub fn format_assignment_lines(assignments: &[Assignment]) -> Vec<String> {
    assignments
        .iter()
        .map(|assignment| {
            format!(
                "{:<13}  {}  {:<8}  {:<11}  {:<24}  {}",
                short_id(&assignment.id.to_string()),
                assignment.due_date,
                assignment.priority,
                assignment.status,
                assignment.title,
                assignment.course
            )
        })
        .collect()
}

pub fn format_event_lines(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| {
            let time = event
                .time
                .map_or_else(String::new, |time| time.format(" %H:%M").to_string());
            format!(
                "{:<13}  {}{}  {:<6}  {:<24}  {}",
                short_id(&event.id.to_string()),
                event.date,
                time,
                event.event_type,
                event.title,
                event.location.as_deref().unwrap_or("")
            )
        })
        .collect()
}

pub fn format_reminder_lines(reminders: &[Reminder], now: NaiveDateTime) -> Vec<String> {
    reminders
        .iter()
        .map(|reminder| {
            let state = if reminder.completed {
                "done"
            } else if reminder.is_overdue(now) {
                "overdue"
            } else {
                "active"
            };
            format!(
                "{:<13}  {} {}  {:<8}  {:<7}  {}",
                short_id(&reminder.id.to_string()),
                reminder.date,
                reminder.time.format("%H:%M"),
                reminder.priority,
                state,
                reminder.title
            )
        })
        .collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            format!(
                "{:<13}  {:<32}  {}",
                short_id(&note.id.to_string()),
                note.title.chars().take(32).collect::<String>(),
                format_relative_time(note.updated_at, now_ms)
            )
        })
        .collect()
}

/// Write rendered output to a path, or print it when no path was given.
pub fn write_or_print(rendered: &str, output_path: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }
    Ok(())
}
