//! Per-day agenda view.
//!
//! Derived on every request from the working set; never persisted.

use super::event::Event;
use super::task::Task;
use chrono::NaiveDate;

/// Open tasks due on `day` plus events starting on `day`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agenda {
    pub day: NaiveDate,
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
}

impl Agenda {
    /// One-line headline, e.g. `Agenda for 2024-06-10: 2 tasks, 1 events`.
    pub fn summary(&self) -> String {
        format!(
            "Agenda for {}: {} tasks, {} events",
            self.day.format("%Y-%m-%d"),
            self.tasks.len(),
            self.events.len()
        )
    }

    /// True when nothing is scheduled for the day.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.events.is_empty()
    }
}
