//! Core domain logic for the planner.
//! This crate is the single source of truth for task/event rules and storage.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, PlannerConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::agenda::Agenda;
pub use model::event::Event;
pub use model::task::{Task, DEFAULT_PRIORITY};
pub use repo::planner_repo::{JsonFileRepository, PlannerRepository, RepoError, RepoResult};
pub use service::planner_service::{
    NewEvent, NewTask, PlannerService, PlannerStats, DEFAULT_AGENDA_DAYS,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens a JSON-backed planner service for the given configuration.
pub fn open_planner(config: &PlannerConfig) -> RepoResult<PlannerService<JsonFileRepository>> {
    PlannerService::open(JsonFileRepository::new(config.data_file.clone()))
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
