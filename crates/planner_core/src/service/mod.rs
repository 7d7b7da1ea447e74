//! Planner use-case services.
//!
//! # Responsibility
//! - Own the in-memory working set of tasks and events.
//! - Apply listing, filtering and agenda rules on top of repository data.
//! - Keep presentation layers decoupled from persistence details.

pub mod planner_service;
