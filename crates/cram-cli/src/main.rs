//! Cram CLI - plan classes, assignments and events from the terminal

mod cli;
mod commands;
mod error;

use clap::Parser;

use cli::{
    AssignCommands, AttachCommands, Cli, ClassCommands, Commands, EventCommands, ExportCommands,
    NoteCommands, NotifyCommands, ProfileCommands, ReminderCommands,
};
use commands::common::{open_prefs, resolve_db_path, resolve_prefs_path};
use error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cram_core=info".parse().unwrap())
                .add_directive("cram_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);
    let prefs_path = resolve_prefs_path(cli.prefs_path);
    let prefs = open_prefs(&prefs_path);

    match cli.command {
        Commands::Refresh => commands::refresh::run_refresh(&db_path, &prefs).await?,
        Commands::Dashboard => commands::dashboard::run_dashboard(&db_path, &prefs).await?,
        Commands::Stats { json } => commands::stats::run_stats(json, &db_path).await?,
        Commands::Class { command } => match command {
            ClassCommands::Add {
                course,
                day,
                start,
                end,
                location,
                instructor,
            } => {
                commands::class::run_add(
                    &course,
                    day,
                    &start,
                    &end,
                    &location,
                    &instructor,
                    &db_path,
                    &prefs,
                )
                .await?;
            }
            ClassCommands::List { json, search } => {
                commands::class::run_list(json, search.as_deref(), &db_path).await?;
            }
            ClassCommands::Delete { id } => {
                commands::class::run_delete(&id, &db_path, &prefs).await?;
            }
        },
        Commands::Assign { command } => match command {
            AssignCommands::Add {
                title,
                course,
                due,
                priority,
            } => {
                commands::assignment::run_add(&title, &course, &due, priority, &db_path, &prefs)
                    .await?;
            }
            AssignCommands::List { json, search } => {
                commands::assignment::run_list(json, search.as_deref(), &db_path).await?;
            }
            AssignCommands::Status { id, status } => {
                commands::assignment::run_status(&id, status, &db_path, &prefs).await?;
            }
        },
        Commands::Event { command } => match command {
            EventCommands::Add {
                title,
                date,
                event_type,
                description,
                location,
                time,
            } => {
                commands::event::run_add(
                    &title,
                    &date,
                    event_type,
                    description,
                    location,
                    time.as_deref(),
                    &db_path,
                    &prefs,
                )
                .await?;
            }
            EventCommands::List { json, search } => {
                commands::event::run_list(json, search.as_deref(), &db_path).await?;
            }
            EventCommands::Delete { id } => {
                commands::event::run_delete(&id, &db_path, &prefs).await?;
            }
        },
        Commands::Reminder { command } => match command {
            ReminderCommands::Add {
                title,
                date,
                time,
                priority,
            } => commands::reminder::run_add(&title, &date, &time, priority, &prefs)?,
            ReminderCommands::List { json } => commands::reminder::run_list(json, &prefs)?,
            ReminderCommands::Toggle { id } => commands::reminder::run_toggle(&id, &prefs)?,
            ReminderCommands::Delete { id } => commands::reminder::run_delete(&id, &prefs)?,
            ReminderCommands::Watch { interval } => {
                commands::reminder::run_watch(interval, &prefs_path).await?;
            }
        },
        Commands::Note { command } => match command {
            NoteCommands::Add { title, content } => {
                commands::note::run_add(&title, &content, &prefs)?;
            }
            NoteCommands::List { json, search } => {
                commands::note::run_list(json, search.as_deref(), &prefs)?;
            }
            NoteCommands::Edit { id, title, content } => {
                commands::note::run_edit(&id, &title, &content, &prefs)?;
            }
            NoteCommands::Delete { id } => commands::note::run_delete(&id, &prefs)?,
            NoteCommands::Export { output } => {
                commands::note::run_export(output.as_deref(), &prefs)?;
            }
            NoteCommands::Import { input } => commands::note::run_import(&input, &prefs)?,
        },
        Commands::Attach { command } => match command {
            AttachCommands::Add { parent, id, file } => {
                commands::attach::run_add(parent, &id, &file, &prefs)?;
            }
            AttachCommands::List { parent, id } => {
                commands::attach::run_list(parent, &id, &prefs)?;
            }
            AttachCommands::Delete {
                parent,
                id,
                attachment_id,
            } => commands::attach::run_delete(parent, &id, &attachment_id, &prefs)?,
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::profile::run_show(&prefs)?,
            ProfileCommands::Set {
                name,
                email,
                theme,
                study_goal_hours,
                notifications,
            } => commands::profile::run_set(
                name,
                email,
                theme,
                study_goal_hours,
                notifications,
                &prefs,
            )?,
            ProfileCommands::Export { output } => {
                commands::profile::run_export(output.as_deref(), &prefs)?;
            }
            ProfileCommands::Import { input } => commands::profile::run_import(&input, &prefs)?,
        },
        Commands::Notify { command } => match command {
            NotifyCommands::Enable => commands::notify::run_enable(&prefs)?,
            NotifyCommands::Disable => commands::notify::run_disable(&prefs)?,
            NotifyCommands::Status => commands::notify::run_status(&prefs)?,
        },
        Commands::Export { command } => match command {
            ExportCommands::Ics {
                assignments,
                output,
            } => commands::export::run_ics(assignments, output.as_deref(), &db_path).await?,
            ExportCommands::Google { id } => commands::export::run_google(&id, &db_path).await?,
        },
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
