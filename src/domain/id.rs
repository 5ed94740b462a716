//! Task identifiers
//!
//! A task ID is an opaque, non-empty string chosen by whoever wrote the task
//! file (e.g. `build`, `T-104`, `deploy.staging`). IDs compare lexically, which
//! is the ordering every deterministic tie-break in the analyzer relies on.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Task ID must not be empty")]
    Empty,
}

/// Unique identifier of a task within one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task ID without validation.
    ///
    /// Callers that accept untrusted input should go through [`str::parse`]
    /// instead, which rejects empty IDs.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id: TaskId = "  build ".parse().unwrap();
        assert_eq!(id.as_str(), "build");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!("".parse::<TaskId>(), Err(IdError::Empty));
        assert_eq!("   ".parse::<TaskId>(), Err(IdError::Empty));
    }

    #[test]
    fn ordering_is_lexical() {
        let mut ids = vec![TaskId::new("b"), TaskId::new("a10"), TaskId::new("a2")];
        ids.sort();
        assert_eq!(ids, vec![TaskId::new("a10"), TaskId::new("a2"), TaskId::new("b")]);
    }

    #[test]
    fn serde_roundtrip_is_transparent() {
        let id = TaskId::new("deploy");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"deploy\"");

        let parsed: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<TaskId>("\"\"").is_err());
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(TaskId::new("x"), 1);
        assert_eq!(map.get("x"), Some(&1));
    }
}
