//! Structural validation
//!
//! Checks referential integrity and priority ordering. Problems are collected,
//! never raised, so the rest of the pipeline still runs on the graph as built.

use serde::Serialize;
use std::fmt;

use crate::domain::{Priority, SourceLocation, TaskId, TaskRegistry};

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// A dependency ID that no registered task carries
    UnresolvedDependency {
        task: TaskId,
        missing: TaskId,
        source: SourceLocation,
    },

    /// A task depending on a task of strictly lower priority
    PriorityInversion {
        task: TaskId,
        task_priority: Priority,
        dependency: TaskId,
        dependency_priority: Priority,
    },
}

impl ValidationIssue {
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationIssue::UnresolvedDependency { .. })
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnresolvedDependency {
                task,
                missing,
                source,
            } => write!(
                f,
                "Task '{}' in {} depends on non-existent task '{}'",
                task, source, missing
            ),
            ValidationIssue::PriorityInversion {
                task,
                task_priority,
                dependency,
                dependency_priority,
            } => write!(
                f,
                "Task '{}' (priority: {}) depends on lower priority task '{}' (priority: {})",
                task, task_priority, dependency, dependency_priority
            ),
        }
    }
}

/// Outcome of [`validate`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Validation {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl Validation {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Validates every registered task's dependencies.
///
/// Findings come out ordered by task ID, then dependency ID.
pub fn validate(registry: &TaskRegistry) -> Validation {
    let mut validation = Validation::default();

    for task in registry.sorted() {
        for dep_id in task.dependencies() {
            let dep = match registry.get(dep_id) {
                Ok(dep) => dep,
                Err(_) => {
                    validation.errors.push(ValidationIssue::UnresolvedDependency {
                        task: task.id.clone(),
                        missing: dep_id.clone(),
                        source: task.source.clone(),
                    });
                    continue;
                }
            };

            if task.priority.rank() > dep.priority.rank() {
                validation.warnings.push(ValidationIssue::PriorityInversion {
                    task: task.id.clone(),
                    task_priority: task.priority,
                    dependency: dep.id.clone(),
                    dependency_priority: dep.priority,
                });
            }
        }
    }

    validation
}
