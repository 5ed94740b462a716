//! Pairwise dependency matrix between registered tasks

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{TaskId, TaskRegistry};

/// How the row task relates to the column task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    #[serde(rename = "self")]
    SelfRef,
    DependsOn,
    DependencyOf,
    Independent,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::SelfRef => "self",
            Relation::DependsOn => "depends_on",
            Relation::DependencyOf => "dependency_of",
            Relation::Independent => "independent",
        }
    }

    /// Single-character cell used in text tables
    pub fn symbol(&self) -> char {
        match self {
            Relation::SelfRef => '=',
            Relation::DependsOn => '>',
            Relation::DependencyOf => '<',
            Relation::Independent => '.',
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row task -> column task -> relation, rows and columns in ID order
pub type DependencyMatrix = BTreeMap<TaskId, BTreeMap<TaskId, Relation>>;

/// Builds the matrix over registered tasks only.
///
/// When two tasks depend on each other, `depends_on` takes precedence.
pub fn dependency_matrix(registry: &TaskRegistry) -> DependencyMatrix {
    let tasks = registry.sorted();

    tasks
        .iter()
        .map(|row| {
            let row_deps = row.dependencies();
            let cells = tasks
                .iter()
                .map(|col| {
                    let relation = if row.id == col.id {
                        Relation::SelfRef
                    } else if row_deps.contains(&col.id) {
                        Relation::DependsOn
                    } else if col.dependencies().contains(&row.id) {
                        Relation::DependencyOf
                    } else {
                        Relation::Independent
                    };
                    (col.id.clone(), relation)
                })
                .collect();
            (row.id.clone(), cells)
        })
        .collect()
}
