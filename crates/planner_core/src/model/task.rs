//! Task domain model.
//!
//! # Responsibility
//! - Define the actionable task record and its lifecycle helpers.
//! - Own the task wire shape inside the planner document.
//!
//! # Invariants
//! - `uid` is assigned once at construction (or load) and never rewritten.
//! - `completed_at` is set whenever `completed` flips through
//!   [`Task::mark_complete`].
//! - Missing optional fields default on load; a missing `uid` is regenerated.

use super::local_now;
use super::uid::new_task_uid;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Priority assigned when callers (or stored documents) don't provide one.
pub const DEFAULT_PRIORITY: i32 = 3;

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// Actionable planner item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    /// Optional deadline. Tasks without one sort after all dated tasks.
    #[serde(default)]
    pub due: Option<NaiveDateTime>,
    /// Conventionally 1 (highest) to 5. Not validated.
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "local_now")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default = "new_task_uid")]
    pub uid: String,
}

impl Task {
    /// Creates an open task with a fresh uid and `created_at = now`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due: None,
            priority: DEFAULT_PRIORITY,
            tags: Vec::new(),
            notes: None,
            completed: false,
            created_at: local_now(),
            completed_at: None,
            uid: new_task_uid(),
        }
    }

    /// Marks the task completed, stamping `completed_at` with the current time.
    ///
    /// Calling this on an already completed task refreshes `completed_at`.
    pub fn mark_complete(&mut self) {
        self.mark_complete_at(local_now());
    }

    /// Same as [`Task::mark_complete`] with an explicit completion time.
    pub fn mark_complete_at(&mut self, at: NaiveDateTime) {
        self.completed = true;
        self.completed_at = Some(at);
    }

    /// Pushes the due date forward by `delta`.
    ///
    /// No-op when the task has no due date. Saturates at the representable
    /// range in the direction of `delta`.
    pub fn snooze(&mut self, delta: Duration) {
        if let Some(due) = self.due {
            let bound = if delta < Duration::zero() {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            };
            self.due = Some(due.checked_add_signed(delta).unwrap_or(bound));
        }
    }

    /// Returns whether the task is due on the given calendar day.
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.due.is_some_and(|due| due.date() == day)
    }
}
