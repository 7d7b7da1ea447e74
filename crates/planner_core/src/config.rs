//! Storage location configuration.
//!
//! # Responsibility
//! - Resolve where the planner document lives.
//! - Keep that decision out of the repository, which only ever receives an
//!   explicit path.
//!
//! # Invariants
//! - Resolution order is: explicit path > `MODERN_PLANNER_HOME` > `~/.modern_planner`.
//! - The document file name inside the data directory is always
//!   [`DATA_FILE_NAME`].

use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable naming the planner data directory.
pub const HOME_ENV_VAR: &str = "MODERN_PLANNER_HOME";
/// Data directory created under the user's home when no override is set.
pub const DEFAULT_DIR_NAME: &str = ".modern_planner";
/// Planner document file name.
pub const DATA_FILE_NAME: &str = "planner_data.json";
/// Sub-directory of the data directory holding rolling log files.
pub const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither `MODERN_PLANNER_HOME` nor a user home directory is available.
    NoHomeDirectory,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDirectory => write!(
                f,
                "cannot resolve planner data directory: set {HOME_ENV_VAR} or a user home directory"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved planner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Full path of the planner JSON document.
    pub data_file: PathBuf,
}

impl PlannerConfig {
    /// Uses an explicit document path, bypassing environment lookup.
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Resolves the default location from the process environment.
    ///
    /// # Errors
    /// - Returns [`ConfigError::NoHomeDirectory`] when neither the override
    ///   variable nor a home directory can be found.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = resolve_data_dir(std::env::var_os(HOME_ENV_VAR), dirs::home_dir())?;
        Ok(Self::with_data_file(data_dir.join(DATA_FILE_NAME)))
    }

    /// Resolves an explicit path when given, otherwise falls back to
    /// [`PlannerConfig::from_env`].
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Ok(Self::with_data_file(path)),
            None => Self::from_env(),
        }
    }

    /// Directory holding the planner document.
    pub fn data_dir(&self) -> &Path {
        self.data_file.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Directory for rolling log files, next to the document.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join(LOG_DIR_NAME)
    }
}

fn resolve_data_dir(
    env_override: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(value) = env_override.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    home.map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::{resolve_data_dir, ConfigError, PlannerConfig};
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn env_override_names_data_directory() {
        let dir = resolve_data_dir(
            Some(OsString::from("/srv/planner")),
            Some(PathBuf::from("/home/someone")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/srv/planner"));
    }

    #[test]
    fn falls_back_to_dotfile_under_home() {
        let dir = resolve_data_dir(None, Some(PathBuf::from("/home/someone"))).unwrap();
        assert_eq!(dir, PathBuf::from("/home/someone/.modern_planner"));
    }

    #[test]
    fn empty_override_is_ignored() {
        let dir = resolve_data_dir(Some(OsString::new()), Some(PathBuf::from("/h"))).unwrap();
        assert_eq!(dir, PathBuf::from("/h/.modern_planner"));
    }

    #[test]
    fn missing_home_and_override_is_an_error() {
        assert_eq!(
            resolve_data_dir(None, None).unwrap_err(),
            ConfigError::NoHomeDirectory
        );
    }

    #[test]
    fn explicit_path_wins_and_log_dir_sits_next_to_document() {
        let config = PlannerConfig::resolve(Some(PathBuf::from("/tmp/p/data.json"))).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/p/data.json"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/p/logs"));
    }
}
