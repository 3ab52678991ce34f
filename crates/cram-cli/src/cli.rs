use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cram_core::models::{EventType, ParentKind, Priority, ThemeMode, Weekday};
use cram_core::AssignmentStatus;

#[derive(Parser)]
#[command(name = "cram")]
#[command(about = "Plan classes, assignments and events from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to local preference file
    #[arg(long, global = true, value_name = "PATH")]
    pub prefs_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all planner collections from the remote store
    Refresh,
    /// Show today's classes and what's coming up
    Dashboard,
    /// Show assignment statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage class sessions
    Class {
        #[command(subcommand)]
        command: ClassCommands,
    },
    /// Manage assignments
    #[command(alias = "assignment")]
    Assign {
        #[command(subcommand)]
        command: AssignCommands,
    },
    /// Manage calendar events
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Manage local reminders
    Reminder {
        #[command(subcommand)]
        command: ReminderCommands,
    },
    /// Manage local notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Manage local file attachments
    Attach {
        #[command(subcommand)]
        command: AttachCommands,
    },
    /// Manage the local user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Configure local notifications
    Notify {
        #[command(subcommand)]
        command: NotifyCommands,
    },
    /// Export planner items to calendar formats
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ClassCommands {
    /// Add a class session to the weekly timetable
    Add {
        /// Course name
        #[arg(long)]
        course: String,
        /// Weekday the class recurs on
        #[arg(long, value_enum)]
        day: WeekdayArg,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM)
        #[arg(long)]
        end: String,
        /// Room or building
        #[arg(long, default_value = "")]
        location: String,
        /// Instructor name
        #[arg(long, default_value = "")]
        instructor: String,
    },
    /// List class sessions
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Filter by text match on course, location or instructor
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a class session
    Delete {
        /// Class session ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum AssignCommands {
    /// Add an assignment
    Add {
        /// Assignment title
        #[arg(long)]
        title: String,
        /// Course name
        #[arg(long)]
        course: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        /// Priority
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
    },
    /// List assignments, soonest due first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Filter by text match on title or course
        #[arg(long)]
        search: Option<String>,
    },
    /// Change an assignment's status
    Status {
        /// Assignment ID
        id: String,
        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// Add a calendar event
    Add {
        /// Event title
        #[arg(long)]
        title: String,
        /// Event date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Kind of event
        #[arg(long = "type", value_enum, default_value_t = EventTypeArg::Other)]
        event_type: EventTypeArg,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Optional venue
        #[arg(long)]
        location: Option<String>,
        /// Optional start time (HH:MM)
        #[arg(long)]
        time: Option<String>,
    },
    /// List events, earliest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Filter by text match on title, description or location
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ReminderCommands {
    /// Add a reminder due at a future moment
    Add {
        /// What to be reminded about
        #[arg(long)]
        title: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Due time (HH:MM)
        #[arg(long)]
        time: String,
        /// Priority
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
    },
    /// List reminders
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a reminder between active and completed
    Toggle {
        /// Reminder ID
        id: String,
    },
    /// Delete a reminder
    Delete {
        /// Reminder ID
        id: String,
    },
    /// Run the periodic due-reminder check in the foreground
    Watch {
        /// Check interval in seconds
        #[arg(long, default_value = "60")]
        interval: u64,
    },
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Add a note
    Add {
        /// Note title
        #[arg(long)]
        title: String,
        /// Note body
        #[arg(long, default_value = "")]
        content: String,
    },
    /// List notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Filter by text match on title or content
        #[arg(long)]
        search: Option<String>,
    },
    /// Edit a note's title and content
    Edit {
        /// Note ID
        id: String,
        /// New title
        #[arg(long)]
        title: String,
        /// New body
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
    /// Export all notes as JSON
    Export {
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import notes from a JSON export, replacing the current list
    Import {
        /// Path to a previously exported JSON file
        input: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum AttachCommands {
    /// Attach a file to an assignment, class or event
    Add {
        /// Parent entity kind
        #[arg(long = "to", value_enum)]
        parent: ParentKindArg,
        /// Parent entity ID
        #[arg(long)]
        id: String,
        /// File to attach
        file: PathBuf,
    },
    /// List attachments for a parent entity
    List {
        /// Parent entity kind
        #[arg(long = "of", value_enum)]
        parent: ParentKindArg,
        /// Parent entity ID
        #[arg(long)]
        id: String,
    },
    /// Delete an attachment
    Delete {
        /// Parent entity kind
        #[arg(long = "from", value_enum)]
        parent: ParentKindArg,
        /// Parent entity ID
        #[arg(long)]
        id: String,
        /// Attachment ID
        attachment_id: String,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the stored profile
    Show,
    /// Update profile fields
    Set {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Contact email
        #[arg(long)]
        email: Option<String>,
        /// Theme preference
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
        /// Daily study goal in hours
        #[arg(long)]
        study_goal_hours: Option<u32>,
        /// Master notification toggle
        #[arg(long)]
        notifications: Option<bool>,
    },
    /// Export the profile as JSON
    Export {
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import a profile from a JSON export
    Import {
        /// Path to a previously exported JSON file
        input: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum NotifyCommands {
    /// Enable local notifications
    Enable,
    /// Disable local notifications
    Disable,
    /// Show notification settings
    Status,
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Render events (and optionally assignments) as an iCalendar file
    Ics {
        /// Include assignment due dates
        #[arg(long)]
        assignments: bool,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Print a Google Calendar link for one event
    Google {
        /// Event ID
        id: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum WeekdayArg {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<WeekdayArg> for Weekday {
    fn from(day: WeekdayArg) -> Self {
        match day {
            WeekdayArg::Monday => Self::Monday,
            WeekdayArg::Tuesday => Self::Tuesday,
            WeekdayArg::Wednesday => Self::Wednesday,
            WeekdayArg::Thursday => Self::Thursday,
            WeekdayArg::Friday => Self::Friday,
            WeekdayArg::Saturday => Self::Saturday,
            WeekdayArg::Sunday => Self::Sunday,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(priority: PriorityArg) -> Self {
        match priority {
            PriorityArg::High => Self::High,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::Low => Self::Low,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StatusArg {
    NotStarted,
    Pending,
    InProgress,
    Completed,
}

impl From<StatusArg> for AssignmentStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::NotStarted => Self::NotStarted,
            StatusArg::Pending => Self::Pending,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Completed => Self::Completed,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum EventTypeArg {
    Exam,
    Cat,
    Other,
}

impl From<EventTypeArg> for EventType {
    fn from(event_type: EventTypeArg) -> Self {
        match event_type {
            EventTypeArg::Exam => Self::Exam,
            EventTypeArg::Cat => Self::Cat,
            EventTypeArg::Other => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ParentKindArg {
    Assignment,
    Class,
    Event,
}

impl From<ParentKindArg> for ParentKind {
    fn from(kind: ParentKindArg) -> Self {
        match kind {
            ParentKindArg::Assignment => Self::Assignment,
            ParentKindArg::Class => Self::Class,
            ParentKindArg::Event => Self::Event,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for ThemeMode {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
            ThemeArg::System => Self::System,
        }
    }
}
