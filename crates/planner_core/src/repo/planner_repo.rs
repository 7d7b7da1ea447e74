//! Planner repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Read and write the whole planner document (`{"tasks": [], "events": []}`).
//! - Create the document on first use.
//!
//! # Invariants
//! - Writes replace the document through a sibling temp file + rename, so a
//!   crash mid-write leaves the previous document intact.
//! - Missing top-level `tasks`/`events` keys load as empty collections.
//! - Any other shape problem is reported as [`RepoError::Malformed`].

use crate::model::event::Event;
use crate::model::task::Task;
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

const TASKS_KEY: &str = "tasks";
const EVENTS_KEY: &str = "events";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for planner document persistence.
#[derive(Debug)]
pub enum RepoError {
    /// File-system failure while touching the document.
    Io { path: PathBuf, source: io::Error },
    /// Document exists but is not a valid planner document.
    Malformed { path: PathBuf, detail: String },
    /// In-memory records could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Malformed { path, detail } => {
                write!(f, "malformed planner document `{}`: {detail}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode planner document: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Persistence contract consumed by the planner service.
pub trait PlannerRepository {
    /// Makes sure the storage location exists, creating an empty document
    /// when needed. Idempotent.
    fn ensure(&self) -> RepoResult<()>;
    /// Loads every stored task and event, in stored order.
    fn load(&self) -> RepoResult<(Vec<Task>, Vec<Event>)>;
    /// Replaces the stored document with the given collections.
    fn save(&self, tasks: &[Task], events: &[Event]) -> RepoResult<()>;
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    tasks: &'a [Task],
    events: &'a [Event],
}

/// JSON-file-backed planner repository.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_document(&self, tasks: &[Task], events: &[Event]) -> RepoResult<()> {
        let payload = serde_json::to_string_pretty(&DocumentRef { tasks, events })?;
        write_atomically(&self.path, payload.as_bytes()).map_err(|err| self.io_error(err))
    }
}

impl PlannerRepository for JsonFileRepository {
    fn ensure(&self) -> RepoResult<()> {
        fs::create_dir_all(parent_dir(&self.path)).map_err(|err| self.io_error(err))?;
        if self.path.exists() {
            return Ok(());
        }

        self.write_document(&[], &[])?;
        info!(
            "event=store_init module=repo status=ok path={}",
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> RepoResult<(Vec<Task>, Vec<Event>)> {
        let started_at = Instant::now();
        self.ensure()?;

        let raw = fs::read_to_string(&self.path).map_err(|err| self.io_error(err))?;
        match parse_document(&raw) {
            Ok((tasks, events)) => {
                info!(
                    "event=store_load module=repo status=ok tasks={} events={} duration_ms={}",
                    tasks.len(),
                    events.len(),
                    started_at.elapsed().as_millis()
                );
                Ok((tasks, events))
            }
            Err(detail) => {
                error!(
                    "event=store_load module=repo status=error error_code=malformed_document duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Err(RepoError::Malformed {
                    path: self.path.clone(),
                    detail,
                })
            }
        }
    }

    fn save(&self, tasks: &[Task], events: &[Event]) -> RepoResult<()> {
        let started_at = Instant::now();
        self.ensure()?;

        if let Err(err) = self.write_document(tasks, events) {
            error!(
                "event=store_save module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        info!(
            "event=store_save module=repo status=ok tasks={} events={} duration_ms={}",
            tasks.len(),
            events.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn parse_document(raw: &str) -> Result<(Vec<Task>, Vec<Event>), String> {
    let value: Value = serde_json::from_str(raw).map_err(|err| format!("invalid JSON: {err}"))?;
    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(format!(
                "top-level value must be an object, got {}",
                value_kind(&other)
            ))
        }
    };

    let tasks = parse_entries(root.remove(TASKS_KEY), TASKS_KEY)?;
    let events = parse_entries(root.remove(EVENTS_KEY), EVENTS_KEY)?;
    Ok((tasks, events))
}

fn parse_entries<T: DeserializeOwned>(value: Option<Value>, key: &str) -> Result<Vec<T>, String> {
    let items = match value {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(format!(
                "`{key}` must be an array, got {}",
                value_kind(&other)
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|err| format!("{key}[{index}]: {err}"))
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = NamedTempFile::new_in(parent_dir(path))?;
    file.write_all(bytes)?;
    file.write_all(b"\n")?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
