//! Record identifier generation.
//!
//! Identifiers keep the `tsk`/`evt` prefix of stored planner documents, but
//! the suffix is a random UUIDv4 in simple (hyphen-free) form instead of a
//! timestamp, so two records created in the same instant never collide.
//! Legacy timestamp-based uids still load as opaque strings.

use uuid::Uuid;

/// Prefix carried by every task uid.
pub const TASK_UID_PREFIX: &str = "tsk";
/// Prefix carried by every event uid.
pub const EVENT_UID_PREFIX: &str = "evt";

/// Generates a fresh task uid, e.g. `tsk3f0c…`.
pub fn new_task_uid() -> String {
    prefixed(TASK_UID_PREFIX)
}

/// Generates a fresh event uid, e.g. `evt9a41…`.
pub fn new_event_uid() -> String {
    prefixed(EVENT_UID_PREFIX)
}

fn prefixed(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}
