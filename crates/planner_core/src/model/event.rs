//! Calendar event model.
//!
//! Events are immutable once created. `end` is expected to be after `start`
//! but that ordering is checked by callers, not here.

use super::uid::new_event_uid;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Time-boxed calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "new_event_uid")]
    pub uid: String,
}

impl Event {
    /// Creates an event with a fresh uid.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            location: None,
            tags: Vec::new(),
            notes: None,
            uid: new_event_uid(),
        }
    }

    /// `end - start`. Negative when the event window is reversed.
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Returns whether the event starts on the given calendar day.
    pub fn starts_on(&self, day: NaiveDate) -> bool {
        self.start.date() == day
    }
}
