use chrono::{Duration, NaiveDate, NaiveDateTime};
use planner_core::{JsonFileRepository, NewEvent, NewTask, PlannerService, DEFAULT_AGENDA_DAYS};
use tempfile::TempDir;

fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").unwrap()
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn open_temp() -> (TempDir, PlannerService<JsonFileRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("planner_data.json"));
    let service = PlannerService::open(repo).unwrap();
    (dir, service)
}

fn add_due(
    service: &mut PlannerService<JsonFileRepository>,
    title: &str,
    due: &str,
    priority: i32,
) -> String {
    service
        .add_task(NewTask {
            due: Some(at(due)),
            priority,
            ..NewTask::new(title)
        })
        .unwrap()
        .uid
}

#[test]
fn agenda_for_day_keeps_open_tasks_and_starting_events_only() {
    let (_dir, mut service) = open_temp();
    add_due(&mut service, "open morning", "2024-06-10 09:00", 3);
    add_due(&mut service, "open evening", "2024-06-10 21:00", 3);
    let done = add_due(&mut service, "done", "2024-06-10 12:00", 3);
    service.complete_task(&done).unwrap();
    add_due(&mut service, "next day", "2024-06-11 09:00", 3);
    service.add_task(NewTask::new("undated")).unwrap();
    service
        .add_event(NewEvent::new("lunch", at("2024-06-10 12:00"), at("2024-06-10 13:00")))
        .unwrap();
    service
        .add_event(NewEvent::new("overnight", at("2024-06-09 22:00"), at("2024-06-10 02:00")))
        .unwrap();

    let agenda = service.agenda_for(date("2024-06-10"));

    let task_titles: Vec<_> = agenda.tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(task_titles, vec!["open morning", "open evening"]);
    assert_eq!(agenda.events.len(), 1);
    assert_eq!(agenda.events[0].title, "lunch");
    assert_eq!(agenda.summary(), "Agenda for 2024-06-10: 2 tasks, 1 events");
}

#[test]
fn agenda_for_empty_day_is_still_returned() {
    let (_dir, service) = open_temp();
    let agenda = service.agenda_for(date("2030-01-01"));

    assert_eq!(agenda.day, date("2030-01-01"));
    assert!(agenda.is_empty());
}

#[test]
fn upcoming_agenda_covers_consecutive_days_in_order() {
    let (_dir, mut service) = open_temp();
    add_due(&mut service, "day two", "2024-12-31 10:00", 3);
    service
        .add_event(NewEvent::new("party", at("2025-01-01 20:00"), at("2025-01-01 23:00")))
        .unwrap();

    let agendas = service.upcoming_agenda_from(date("2024-12-30"), 4);

    let days: Vec<_> = agendas.iter().map(|agenda| agenda.day).collect();
    assert_eq!(
        days,
        vec![
            date("2024-12-30"),
            date("2024-12-31"),
            date("2025-01-01"),
            date("2025-01-02")
        ]
    );
    assert!(agendas[0].is_empty());
    assert_eq!(agendas[1].tasks.len(), 1);
    assert_eq!(agendas[2].events.len(), 1);
    assert!(service.upcoming_agenda_from(date("2024-12-30"), 0).is_empty());
}

#[test]
fn default_upcoming_agenda_is_a_week_starting_today() {
    let (_dir, service) = open_temp();
    assert_eq!(DEFAULT_AGENDA_DAYS, 7);
    let agendas = service.upcoming_agenda(DEFAULT_AGENDA_DAYS);

    assert_eq!(agendas.len(), 7);
    assert_eq!(agendas[0].day, chrono::Local::now().date_naive());
    assert_eq!(agendas[6].day - agendas[0].day, Duration::days(6));
}

#[test]
fn stats_on_empty_working_set_are_zero() {
    let (_dir, service) = open_temp();
    let stats = service.stats();

    assert_eq!(stats.total_tasks, 0);
    assert_eq!(stats.completed_tasks, 0);
    assert_eq!(stats.upcoming_tasks, 0);
    assert_eq!(stats.events, 0);
    assert!(stats.by_priority.is_empty());
}

#[test]
fn stats_count_completion_upcoming_and_priorities() {
    let (_dir, mut service) = open_temp();
    add_due(&mut service, "past", "2024-06-09 23:59", 2);
    add_due(&mut service, "today", "2024-06-10 00:00", 5);
    add_due(&mut service, "future", "2024-07-01 09:00", 2);
    let done = add_due(&mut service, "done future", "2024-08-01 09:00", 1);
    service.complete_task(&done).unwrap();
    service.add_task(NewTask::new("undated")).unwrap();
    service
        .add_event(NewEvent::new("call", at("2024-06-10 10:00"), at("2024-06-10 11:00")))
        .unwrap();

    let stats = service.stats_as_of(date("2024-06-10"));

    assert_eq!(stats.total_tasks, 5);
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.upcoming_tasks, 2);
    assert_eq!(stats.events, 1);
    let by_priority: Vec<_> = stats.by_priority.into_iter().collect();
    assert_eq!(by_priority, vec![(1, 1), (2, 2), (3, 1), (5, 1)]);
}
