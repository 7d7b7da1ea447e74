//! Plain-text rendering of planner records for the terminal.

use chrono::Duration;
use planner_core::{Agenda, Event, PlannerStats, Task};

const DATETIME_DISPLAY: &str = "%Y-%m-%d %H:%M";

pub fn format_task(task: &Task) -> String {
    let due = task
        .due
        .map(|due| due.format(DATETIME_DISPLAY).to_string())
        .unwrap_or_else(|| "--".to_string());
    let status = if task.completed { "✓" } else { " " };
    format!(
        "[{status}] {} | {} | due: {due} | priority: {}{}",
        task.uid,
        task.title,
        task.priority,
        format_tags(&task.tags)
    )
}

pub fn format_event(event: &Event) -> String {
    let location = event
        .location
        .as_deref()
        .map(|location| format!(" @ {location}"))
        .unwrap_or_default();
    format!(
        "{} | {} | {}-{}{location}{}",
        event.uid,
        event.title,
        event.start.format(DATETIME_DISPLAY),
        event.end.format("%H:%M"),
        format_tags(&event.tags)
    )
}

pub fn format_agenda(agenda: &Agenda) -> Vec<String> {
    let mut lines = vec![agenda.summary(), "  Tasks:".to_string()];
    if agenda.tasks.is_empty() {
        lines.push("    (no tasks)".to_string());
    } else {
        lines.extend(agenda.tasks.iter().map(|task| format!("    - {}", format_task(task))));
    }

    lines.push("  Events:".to_string());
    if agenda.events.is_empty() {
        lines.push("    (no events)".to_string());
    } else {
        lines.extend(
            agenda
                .events
                .iter()
                .map(|event| format!("    - {}", format_event(event))),
        );
    }
    lines
}

pub fn format_stats(stats: &PlannerStats) -> Vec<String> {
    let mut lines = vec![
        "Planner statistics:".to_string(),
        format!(
            "  Tasks: {} (completed: {}, upcoming: {})",
            stats.total_tasks, stats.completed_tasks, stats.upcoming_tasks
        ),
        format!("  Events: {}", stats.events),
        "  By priority:".to_string(),
    ];
    lines.extend(
        stats
            .by_priority
            .iter()
            .map(|(priority, count)| format!("    Priority {priority}: {count}")),
    );
    lines
}

/// `H:MM:SS`, hours not wrapped at 24.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds();
    let sign = if total_seconds < 0 { "-" } else { "" };
    let total_seconds = total_seconds.abs();
    format!(
        "{sign}{}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(", "))
    }
}
