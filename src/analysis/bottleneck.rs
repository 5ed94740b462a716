//! Bottleneck ranking by direct fan-in

use serde::Serialize;

use crate::domain::{DependencyGraph, TaskId, TaskRegistry};

/// A registered task and how many other tasks depend on it directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bottleneck {
    pub task_id: TaskId,
    pub dependents: usize,
}

/// Ranks registered tasks with at least one dependent.
///
/// Sorted by dependent count descending, then by task ID. A self-loop does not
/// count as a dependent.
pub fn rank_bottlenecks(graph: &DependencyGraph, registry: &TaskRegistry) -> Vec<Bottleneck> {
    let mut ranking: Vec<Bottleneck> = registry
        .all()
        .map(|task| Bottleneck {
            task_id: task.id.clone(),
            dependents: graph.dependents(&task.id).filter(|d| **d != task.id).count(),
        })
        .filter(|b| b.dependents > 0)
        .collect();

    ranking.sort_by(|a, b| {
        b.dependents
            .cmp(&a.dependents)
            .then_with(|| a.task_id.cmp(&b.task_id))
    });
    ranking
}
