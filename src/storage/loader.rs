//! Task file loading
//!
//! Each task lives in its own YAML (`.yaml`/`.yml`) or JSON (`.json`) file:
//!
//! ```yaml
//! task_id: build
//! task_name: Build artefacts
//! priority: high
//! dependencies:
//!   hard_dependencies:
//!     - task_id: fetch
//!       reason: needs sources
//!   soft_dependencies:
//!     - lint
//! ```
//!
//! Dependency entries may be objects with a `task_id` key or bare IDs; any
//! other shape is ignored. A file that cannot be read or parsed, has no
//! `task_id`, or repeats an ID already loaded is skipped and reported as a
//! [`LoadError`]; the remaining files still load.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Priority, RegistryError, SourceLocation, TaskId, TaskRecord, TaskRegistry};

const TASK_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error loading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No task_id found in {}", path.display())]
    MissingId { path: PathBuf },

    #[error(transparent)]
    Duplicate(#[from] RegistryError),
}

/// A scalar ID as written in a task file (`task_id: 104` is allowed)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_task_id(self) -> Option<TaskId> {
        match self {
            RawId::Text(s) => s.parse().ok(),
            RawId::Number(n) => Some(TaskId::new(n.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDependency {
    Entry { task_id: RawId },
    Bare(RawId),
    Other(IgnoredAny),
}

#[derive(Debug, Default, Deserialize)]
struct RawDependencies {
    hard_dependencies: Option<Vec<RawDependency>>,
    soft_dependencies: Option<Vec<RawDependency>>,
}

/// On-disk layout of one task file
#[derive(Debug, Deserialize)]
struct TaskFile {
    task_id: Option<RawId>,
    task_name: Option<String>,
    priority: Option<String>,
    dependencies: Option<RawDependencies>,
}

fn dependency_ids(raw: Option<Vec<RawDependency>>) -> impl Iterator<Item = TaskId> {
    raw.unwrap_or_default().into_iter().filter_map(|dep| match dep {
        RawDependency::Entry { task_id } | RawDependency::Bare(task_id) => task_id.into_task_id(),
        RawDependency::Other(_) => None,
    })
}

impl TaskFile {
    fn into_record(self, path: &Path) -> Result<TaskRecord, LoadError> {
        let id = self
            .task_id
            .and_then(RawId::into_task_id)
            .ok_or_else(|| LoadError::MissingId {
                path: path.to_path_buf(),
            })?;

        let priority = match self.priority.as_deref() {
            None => Priority::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(task = %id, "{}, using medium", e);
                Priority::Medium
            }),
        };

        let name = self.task_name.unwrap_or_else(|| "Unnamed".to_string());
        let mut record = TaskRecord::new(id, name)
            .with_priority(priority)
            .with_source(SourceLocation::file(path));

        let deps = self.dependencies.unwrap_or_default();
        record.hard_dependencies.extend(dependency_ids(deps.hard_dependencies));
        record.soft_dependencies.extend(dependency_ids(deps.soft_dependencies));

        Ok(record)
    }
}

/// Tasks that loaded plus the files that did not
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub registry: TaskRegistry,
    pub errors: Vec<LoadError>,
    pub files: usize,
}

impl LoadOutcome {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Reads task files into a [`TaskRegistry`]
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskLoader;

impl TaskLoader {
    pub fn new() -> Self {
        Self
    }

    /// Expands the given paths into a sorted list of task files.
    ///
    /// Directories contribute their direct children with a task extension.
    /// With no paths, the current directory is scanned. A path that does not
    /// exist is an error.
    pub fn discover(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let paths = if paths.is_empty() {
            vec![std::env::current_dir().context("Failed to read current directory")?]
        } else {
            paths.to_vec()
        };

        let missing: Vec<String> = paths
            .iter()
            .filter(|p| !p.exists())
            .map(|p| p.display().to_string())
            .collect();
        if !missing.is_empty() {
            bail!("The following paths do not exist: {}", missing.join(", "));
        }

        let mut files = Vec::new();
        for path in paths {
            if path.is_dir() {
                let mut children: Vec<PathBuf> = fs::read_dir(&path)
                    .with_context(|| format!("Failed to read directory: {}", path.display()))?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .filter(|p| p.is_file() && is_task_file(p))
                    .collect();
                children.sort();
                files.extend(children);
            } else {
                files.push(path);
            }
        }

        debug!(count = files.len(), "discovered task files");
        Ok(files)
    }

    /// Parses a single task file
    pub fn load_file(&self, path: &Path) -> Result<TaskRecord, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: TaskFile = if has_extension(path, "json") {
            serde_json::from_str(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        };

        file.into_record(path)
    }

    /// Loads every file, registering what parses and collecting the rest
    pub fn load(&self, files: &[PathBuf]) -> LoadOutcome {
        let mut outcome = LoadOutcome {
            files: files.len(),
            ..LoadOutcome::default()
        };

        for path in files {
            let loaded = self
                .load_file(path)
                .and_then(|record| {
                    let deps = record.dependencies().len();
                    let id = record.id.clone();
                    outcome.registry.register(record)?;
                    Ok((id, deps))
                });

            match loaded {
                Ok((id, deps)) => debug!(task = %id, dependencies = deps, "loaded task"),
                Err(e) => {
                    warn!("{}", e);
                    outcome.errors.push(e);
                }
            }
        }

        outcome
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn is_task_file(path: &Path) -> bool {
    TASK_EXTENSIONS.iter().any(|ext| has_extension(path, ext))
}
