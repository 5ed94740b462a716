//! Task domain model
//!
//! A task record is the unit of analysis: an ID, a display name, a priority and
//! two sets of dependency IDs. Records are produced by the loader and consumed
//! read-only by the analyzer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown priority '{0}': expected low, medium, high or critical")]
pub struct ParsePriorityError(pub String);

/// Priority of a task, ordered `Low < Medium < High < Critical`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Numeric rank used for priority-inversion checks (`low=1` .. `critical=4`)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// Where a task record came from. Only used to make messages traceable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLocation {
    File(PathBuf),
    #[default]
    Inline,
}

impl SourceLocation {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceLocation::File(path.into())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::File(path) => match path.file_name() {
                Some(name) => write!(f, "{}", name.to_string_lossy()),
                None => write!(f, "{}", path.display()),
            },
            SourceLocation::Inline => f.write_str("<inline>"),
        }
    }
}

/// A declarative task definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,

    /// Human-readable label
    pub name: String,

    #[serde(default)]
    pub priority: Priority,

    /// Tasks that must be considered before this one
    #[serde(default)]
    pub hard_dependencies: BTreeSet<TaskId>,

    /// Preferred-but-optional predecessors
    #[serde(default)]
    pub soft_dependencies: BTreeSet<TaskId>,

    #[serde(default)]
    pub source: SourceLocation,
}

impl TaskRecord {
    /// Creates a record with no dependencies and `medium` priority
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            priority: Priority::default(),
            hard_dependencies: BTreeSet::new(),
            soft_dependencies: BTreeSet::new(),
            source: SourceLocation::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = source;
        self
    }

    /// Adds a hard dependency. Returns false if it was already present.
    pub fn depends_on(&mut self, id: TaskId) -> bool {
        self.hard_dependencies.insert(id)
    }

    /// Adds a soft dependency. Returns false if it was already present.
    pub fn prefers_after(&mut self, id: TaskId) -> bool {
        self.soft_dependencies.insert(id)
    }

    /// All dependency IDs, hard and soft, each at most once, in lexical order
    pub fn dependencies(&self) -> BTreeSet<&TaskId> {
        self.hard_dependencies
            .iter()
            .chain(self.soft_dependencies.iter())
            .collect()
    }

    pub fn has_dependencies(&self) -> bool {
        !self.hard_dependencies.is_empty() || !self.soft_dependencies.is_empty()
    }
}
