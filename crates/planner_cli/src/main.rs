//! Command-line front end for the planner.
//!
//! # Responsibility
//! - Parse arguments and user-supplied dates/durations.
//! - Call `planner_core` exclusively and render the results as text.
//!
//! # Invariants
//! - No entity field is mutated here; every change goes through the service.
//! - Event windows are checked (`end > start`) before reaching the service.

mod parse;
mod render;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use log::warn;
use parse::{parse_date, parse_datetime, parse_duration};
use planner_core::{
    default_log_level, init_logging, open_planner, NewEvent, NewTask, PlannerConfig,
    PlannerRepository, PlannerService, DEFAULT_PRIORITY,
};
use render::{format_agenda, format_duration, format_event, format_stats, format_task};
use std::path::PathBuf;

const DEFAULT_CLI_AGENDA_DAYS: u32 = 3;
/// Ten years of daily agendas.
const MAX_CLI_AGENDA_DAYS: i64 = 3660;

#[derive(Parser)]
#[command(name = "planner", version)]
#[command(about = "A modern command line planner for tasks and events.")]
struct Cli {
    /// Path to the storage file (defaults to ~/.modern_planner/planner_data.json)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Log level for the rolling log next to the storage file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    AddTask {
        title: String,

        /// Due date/time (e.g. "2024-06-10 17:00")
        #[arg(long, value_parser = parse_datetime)]
        due: Option<NaiveDateTime>,

        /// Priority (1-5)
        #[arg(long, default_value_t = DEFAULT_PRIORITY, allow_negative_numbers = true)]
        priority: i32,

        /// Tags for grouping tasks
        #[arg(long, num_args = 0..)]
        tags: Vec<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// List tasks
    ListTasks {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Mark a task as completed
    Complete { uid: String },
    /// Snooze a task by HH:MM
    Snooze {
        uid: String,

        #[arg(value_parser = parse_duration)]
        duration: Duration,
    },
    /// Add a new calendar event
    AddEvent {
        title: String,

        #[arg(value_parser = parse_datetime)]
        start: NaiveDateTime,

        #[arg(value_parser = parse_datetime)]
        end: NaiveDateTime,

        #[arg(long)]
        location: Option<String>,

        /// Tags for grouping events
        #[arg(long, num_args = 0..)]
        tags: Vec<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// List events, optionally within a date range
    ListEvents {
        /// First start date to include
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// Last start date to include
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Show the agenda for the coming days
    Agenda {
        /// Number of days to show (0-3660)
        #[arg(
            long,
            default_value_t = DEFAULT_CLI_AGENDA_DAYS,
            value_parser = clap::value_parser!(u32).range(0..=MAX_CLI_AGENDA_DAYS)
        )]
        days: u32,
    },
    /// Show planner statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = PlannerConfig::resolve(cli.storage)?;
    start_logging(&config, cli.log_level.as_deref());

    let mut service = open_planner(&config).with_context(|| {
        format!(
            "failed to open planner storage at {}",
            config.data_file.display()
        )
    })?;

    for line in dispatch(cli.command, &mut service)? {
        println!("{line}");
    }
    Ok(())
}

/// Best-effort: the planner works without a log file.
fn start_logging(config: &PlannerConfig, level: Option<&str>) {
    let log_dir = config.log_dir();
    let log_dir = if log_dir.is_absolute() {
        log_dir
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(log_dir),
            Err(_) => log_dir,
        }
    };

    if let Err(err) = init_logging(level.unwrap_or(default_log_level()), &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn dispatch<R: PlannerRepository>(
    command: Commands,
    service: &mut PlannerService<R>,
) -> Result<Vec<String>> {
    let lines = match command {
        Commands::AddTask {
            title,
            due,
            priority,
            tags,
            notes,
        } => {
            let task = service.add_task(NewTask {
                title,
                due,
                priority,
                tags,
                notes,
            })?;
            vec!["Task created:".to_string(), format!("  {}", format_task(&task))]
        }
        Commands::ListTasks { all } => {
            let tasks = service.list_tasks(all);
            if tasks.is_empty() {
                vec!["No tasks found.".to_string()]
            } else {
                tasks.iter().map(format_task).collect()
            }
        }
        Commands::Complete { uid } => match service.complete_task(&uid)? {
            Some(_) => vec![format!("Task {uid} completed.")],
            None => vec![format!("Task {uid} not found.")],
        },
        Commands::Snooze { uid, duration } => match service.snooze_task(&uid, duration)? {
            Some(_) => vec![format!(
                "Task {uid} snoozed by {}.",
                format_duration(duration)
            )],
            None => vec![format!("Task {uid} not found.")],
        },
        Commands::AddEvent {
            title,
            start,
            end,
            location,
            tags,
            notes,
        } => {
            if end <= start {
                warn!("event=event_add module=cli status=rejected reason=end_not_after_start");
                bail!("end time must be after start time");
            }
            let event = service.add_event(NewEvent {
                title,
                start,
                end,
                location,
                tags,
                notes,
            })?;
            vec![
                "Event created:".to_string(),
                format!("  {}", format_event(&event)),
            ]
        }
        Commands::ListEvents { from, to } => {
            let events = service.list_events(from, to);
            if events.is_empty() {
                vec!["No events found.".to_string()]
            } else {
                events.iter().map(format_event).collect()
            }
        }
        Commands::Agenda { days } => {
            let agendas = service.upcoming_agenda(days);
            if agendas.is_empty() {
                vec!["No agenda items found.".to_string()]
            } else {
                let blocks: Vec<Vec<String>> = agendas.iter().map(format_agenda).collect();
                blocks.join(&String::new())
            }
        }
        Commands::Stats => format_stats(&service.stats()),
    };
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::{dispatch, Cli, Commands};
    use clap::Parser;
    use planner_core::{JsonFileRepository, PlannerService};
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, PlannerService<JsonFileRepository>) {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("planner_data.json"));
        (dir, PlannerService::open(repo).unwrap())
    }

    fn command(args: &[&str]) -> Commands {
        let mut argv = vec!["planner"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    fn run(service: &mut PlannerService<JsonFileRepository>, args: &[&str]) -> Vec<String> {
        dispatch(command(args), service).unwrap()
    }

    #[test]
    fn add_and_list_tasks_end_to_end() {
        let (_dir, mut service) = open_temp();

        let created = run(
            &mut service,
            &[
                "add-task",
                "Write report",
                "--due",
                "2024-06-10 17:00",
                "--priority",
                "2",
                "--tags",
                "work",
            ],
        );
        assert_eq!(created[0], "Task created:");
        run(&mut service, &["add-task", "Buy milk", "--priority", "4"]);

        let listed = run(&mut service, &["list-tasks"]);
        assert_eq!(listed.len(), 2);
        assert!(listed[0].contains("Write report"));
        assert!(listed[0].ends_with("priority: 2 [work]"));
        assert!(listed[1].contains("Buy milk"));
    }

    #[test]
    fn complete_and_snooze_report_not_found() {
        let (_dir, mut service) = open_temp();

        assert_eq!(
            run(&mut service, &["complete", "tsk404"]),
            vec!["Task tsk404 not found."]
        );
        assert_eq!(
            run(&mut service, &["snooze", "tsk404", "01:30"]),
            vec!["Task tsk404 not found."]
        );
    }

    #[test]
    fn snooze_reports_duration() {
        let (_dir, mut service) = open_temp();
        run(&mut service, &["add-task", "call", "--due", "2024-01-01 09:00"]);
        let uid = service.tasks()[0].uid.clone();

        let lines = run(&mut service, &["snooze", uid.as_str(), "01:30"]);
        assert_eq!(lines, vec![format!("Task {uid} snoozed by 1:30:00.")]);
    }

    #[test]
    fn add_event_rejects_reversed_window_before_service() {
        let (_dir, mut service) = open_temp();

        let err = dispatch(
            command(&["add-event", "oops", "2024-03-05 11:00", "2024-03-05 10:00"]),
            &mut service,
        )
        .unwrap_err();
        assert!(err.to_string().contains("after start"));
        assert!(service.events().is_empty());
    }

    #[test]
    fn list_events_applies_date_range() {
        let (_dir, mut service) = open_temp();
        run(
            &mut service,
            &["add-event", "in", "2024-03-05 10:00", "2024-03-05 11:00"],
        );
        run(
            &mut service,
            &["add-event", "out", "2024-04-05 10:00", "2024-04-05 11:00"],
        );

        let lines = run(
            &mut service,
            &["list-events", "--from", "2024-03-01", "--to", "31/03/2024"],
        );
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("| in |"));
    }

    #[test]
    fn agenda_blocks_are_separated_by_blank_lines() {
        let (_dir, mut service) = open_temp();
        let lines = run(&mut service, &["agenda", "--days", "2"]);

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[5], "");
        assert!(lines[6].starts_with("Agenda for "));
    }

    #[test]
    fn malformed_input_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["planner", "snooze", "tsk1", "90min"]).is_err());
        assert!(Cli::try_parse_from(["planner", "add-task", "x", "--due", "tomorrow"]).is_err());
        assert!(Cli::try_parse_from(["planner", "list-events", "--from", "03/2024"]).is_err());
    }

    #[test]
    fn agenda_days_are_capped() {
        assert!(Cli::try_parse_from(["planner", "agenda", "--days", "3660"]).is_ok());
        assert!(Cli::try_parse_from(["planner", "agenda", "--days", "3661"]).is_err());
        assert!(Cli::try_parse_from(["planner", "agenda", "--days", "4000000000"]).is_err());
    }

    #[test]
    fn empty_planner_reports_nothing_found() {
        let (_dir, mut service) = open_temp();
        assert_eq!(run(&mut service, &["list-tasks"]), vec!["No tasks found."]);
        assert_eq!(run(&mut service, &["list-events"]), vec!["No events found."]);
        assert_eq!(run(&mut service, &["stats"])[1], "  Tasks: 0 (completed: 0, upcoming: 0)");
    }
}
