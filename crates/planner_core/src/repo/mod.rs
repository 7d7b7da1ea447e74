//! Persistence provider contracts and implementations.
//!
//! # Responsibility
//! - Define the load/save contract the planner service depends on.
//! - Isolate document format and file-system details from the service.
//!
//! # Invariants
//! - `load` and `save` always `ensure` the storage location first.
//! - `save` writes the full collections; there is no incremental update path.
//! - A corrupt document is a hard error, never silently treated as empty.

pub mod planner_repo;
