//! Planner use-case service.
//!
//! # Responsibility
//! - Load the working set once, mutate it in memory, and write it through
//!   to the repository after every mutation.
//! - Provide the sorted/filtered views consumed by presentation layers.
//!
//! # Invariants
//! - Every mutating call persists the full working set before returning.
//! - Lookups by uid report absence as `Ok(None)`, never as an error.
//! - No input validation happens here (priority range, empty titles, event
//!   ordering are caller concerns).

use crate::model::agenda::Agenda;
use crate::model::event::Event;
use crate::model::task::{Task, DEFAULT_PRIORITY};
use crate::repo::planner_repo::{PlannerRepository, RepoResult};
use chrono::{Days, Duration, Local, NaiveDate, NaiveDateTime};
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Default horizon for [`PlannerService::upcoming_agenda`] callers.
pub const DEFAULT_AGENDA_DAYS: u32 = 7;

/// Request model for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub due: Option<NaiveDateTime>,
    pub priority: i32,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl NewTask {
    /// Undated task with default priority, no tags and no notes.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due: None,
            priority: DEFAULT_PRIORITY,
            tags: Vec::new(),
            notes: None,
        }
    }
}

/// Request model for scheduling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            location: None,
            tags: Vec::new(),
            notes: None,
        }
    }
}

/// Working-set summary counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Open tasks due today or later.
    pub upcoming_tasks: usize,
    pub events: usize,
    /// Task count per priority value, ascending by priority.
    pub by_priority: BTreeMap<i32, usize>,
}

/// Planner facade over a repository implementation.
pub struct PlannerService<R: PlannerRepository> {
    repo: R,
    tasks: Vec<Task>,
    events: Vec<Event>,
}

impl<R: PlannerRepository> PlannerService<R> {
    /// Loads the working set from `repo`.
    ///
    /// # Errors
    /// - Propagates repository I/O and malformed-document errors.
    pub fn open(repo: R) -> RepoResult<Self> {
        let (tasks, events) = repo.load()?;
        info!(
            "event=service_open module=service status=ok tasks={} events={}",
            tasks.len(),
            events.len()
        );
        Ok(Self {
            repo,
            tasks,
            events,
        })
    }

    /// Replaces the working set with the repository's current contents.
    ///
    /// Unsaved in-memory state does not exist (every mutation is written
    /// through), so this only picks up changes made by other writers.
    pub fn refresh(&mut self) -> RepoResult<()> {
        let (tasks, events) = self.repo.load()?;
        self.tasks = tasks;
        self.events = events;
        debug!(
            "event=service_refresh module=service status=ok tasks={} events={}",
            self.tasks.len(),
            self.events.len()
        );
        Ok(())
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Creates, stores and returns a new task.
    pub fn add_task(&mut self, request: NewTask) -> RepoResult<Task> {
        let mut task = Task::new(request.title);
        task.due = request.due;
        task.priority = request.priority;
        task.tags = request.tags;
        task.notes = request.notes;

        self.tasks.push(task.clone());
        self.persist()?;
        info!(
            "event=task_add module=service status=ok uid={} has_due={}",
            task.uid,
            task.due.is_some()
        );
        Ok(task)
    }

    /// Lists tasks: open before completed, then by due date (undated last),
    /// priority and creation time.
    ///
    /// Completed tasks are dropped unless `include_completed` is set.
    pub fn list_tasks(&self, include_completed: bool) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| include_completed || !task.completed)
            .cloned()
            .collect();
        tasks.sort_by(task_order);
        tasks
    }

    /// Marks the task with `uid` completed.
    ///
    /// Returns `Ok(None)` when no task matches.
    pub fn complete_task(&mut self, uid: &str) -> RepoResult<Option<Task>> {
        self.update_task(uid, "task_complete", Task::mark_complete)
    }

    /// Pushes the due date of the task with `uid` forward by `delta`.
    ///
    /// Undated tasks are left unchanged but the working set is still
    /// persisted. Returns `Ok(None)` when no task matches.
    pub fn snooze_task(&mut self, uid: &str, delta: Duration) -> RepoResult<Option<Task>> {
        self.update_task(uid, "task_snooze", |task| task.snooze(delta))
    }

    /// Creates, stores and returns a new event.
    pub fn add_event(&mut self, request: NewEvent) -> RepoResult<Event> {
        let mut event = Event::new(request.title, request.start, request.end);
        event.location = request.location;
        event.tags = request.tags;
        event.notes = request.notes;

        self.events.push(event.clone());
        self.persist()?;
        info!("event=event_add module=service status=ok uid={}", event.uid);
        Ok(event)
    }

    /// Lists events by start time, optionally bounded by inclusive start-date
    /// filters on either side.
    pub fn list_events(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|event| start_date.map_or(true, |from| event.start.date() >= from))
            .filter(|event| end_date.map_or(true, |to| event.start.date() <= to))
            .cloned()
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start));
        events
    }

    /// Open tasks due on `day` and events starting on `day`, in insertion order.
    pub fn agenda_for(&self, day: NaiveDate) -> Agenda {
        Agenda {
            day,
            tasks: self
                .tasks
                .iter()
                .filter(|task| !task.completed && task.is_due_on(day))
                .cloned()
                .collect(),
            events: self
                .events
                .iter()
                .filter(|event| event.starts_on(day))
                .cloned()
                .collect(),
        }
    }

    /// One agenda per day for `days` consecutive days starting today.
    pub fn upcoming_agenda(&self, days: u32) -> Vec<Agenda> {
        self.upcoming_agenda_from(today(), days)
    }

    /// One agenda per day for `days` consecutive days starting at `start`.
    pub fn upcoming_agenda_from(&self, start: NaiveDate, days: u32) -> Vec<Agenda> {
        (0..days)
            .map_while(|offset| start.checked_add_days(Days::new(u64::from(offset))))
            .map(|day| self.agenda_for(day))
            .collect()
    }

    /// Summary counters relative to today.
    pub fn stats(&self) -> PlannerStats {
        self.stats_as_of(today())
    }

    /// Summary counters with an explicit notion of "today".
    pub fn stats_as_of(&self, today: NaiveDate) -> PlannerStats {
        let mut stats = PlannerStats {
            total_tasks: self.tasks.len(),
            events: self.events.len(),
            ..PlannerStats::default()
        };

        for task in &self.tasks {
            *stats.by_priority.entry(task.priority).or_insert(0) += 1;
            if task.completed {
                stats.completed_tasks += 1;
            } else if task.due.is_some_and(|due| due.date() >= today) {
                stats.upcoming_tasks += 1;
            }
        }

        stats
    }

    fn update_task(
        &mut self,
        uid: &str,
        event_name: &str,
        apply: impl FnOnce(&mut Task),
    ) -> RepoResult<Option<Task>> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.uid == uid) else {
            info!("event={event_name} module=service status=not_found uid={uid}");
            return Ok(None);
        };

        apply(task);
        let updated = task.clone();
        self.persist()?;
        info!("event={event_name} module=service status=ok uid={uid}");
        Ok(Some(updated))
    }

    fn persist(&self) -> RepoResult<()> {
        self.repo.save(&self.tasks, &self.events)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn task_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| due_key(a).cmp(&due_key(b)))
        .then_with(|| a.priority.cmp(&b.priority))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Undated tasks compare as later than any dated one.
fn due_key(task: &Task) -> (bool, Option<NaiveDateTime>) {
    (task.due.is_none(), task.due)
}
