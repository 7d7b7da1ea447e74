//! Planner domain model.
//!
//! # Responsibility
//! - Define the task/event records persisted in the planner document.
//! - Define the transient agenda view derived from them.
//!
//! # Invariants
//! - Every persisted record carries a prefixed string uid (`tsk…`/`evt…`).
//! - Timestamps are naive local date-times serialized as ISO-8601.

pub mod agenda;
pub mod event;
pub mod task;
pub mod uid;

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Current wall-clock time used for `created_at`/`completed_at` stamps.
///
/// Truncated to microseconds so stored timestamps carry at most six
/// fractional digits.
pub(crate) fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}
