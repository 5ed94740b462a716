//! In-memory collection of task records keyed by ID

use std::collections::HashMap;
use thiserror::Error;

use super::id::TaskId;
use super::task::{SourceLocation, TaskRecord};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Duplicate task ID '{id}' in {duplicate} (already defined in {existing})")]
    DuplicateTask {
        id: TaskId,
        existing: SourceLocation,
        duplicate: SourceLocation,
    },

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Registered tasks for one analysis run.
///
/// The first registration of an ID wins; later records with the same ID are
/// rejected rather than silently replacing it.
#[derive(Debug, Default, Clone)]
pub struct TaskRegistry {
    tasks: HashMap<TaskId, TaskRecord>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Builds a registry from records, failing on the first duplicate ID
    pub fn from_records(records: impl IntoIterator<Item = TaskRecord>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for record in records {
            registry.register(record)?;
        }
        Ok(registry)
    }

    /// Adds a record to the registry
    pub fn register(&mut self, record: TaskRecord) -> Result<(), RegistryError> {
        if let Some(existing) = self.tasks.get(&record.id) {
            return Err(RegistryError::DuplicateTask {
                id: record.id.clone(),
                existing: existing.source.clone(),
                duplicate: record.source,
            });
        }
        self.tasks.insert(record.id.clone(), record);
        Ok(())
    }

    /// Looks up a record by ID
    pub fn get(&self, id: &TaskId) -> Result<&TaskRecord, RegistryError> {
        self.tasks
            .get(id)
            .ok_or_else(|| RegistryError::TaskNotFound(id.clone()))
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Iterates over all records in unspecified order
    pub fn all(&self) -> impl Iterator<Item = &TaskRecord> {
        self.tasks.values()
    }

    /// Returns all records sorted by ID
    pub fn sorted(&self) -> Vec<&TaskRecord> {
        let mut records: Vec<_> = self.tasks.values().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
