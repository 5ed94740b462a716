//! Topological ordering and level assignment
//!
//! Level = length of the longest dependency chain from a task down to a task
//! with no (resolvable) dependencies, which sits at level 0.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::error::AnalysisError;
use crate::domain::{DependencyGraph, TaskId, TaskRegistry};

/// Level of every registered task
pub type Levels = BTreeMap<TaskId, usize>;

/// Orders all nodes so that each node comes after everything it depends on.
///
/// Kahn's algorithm; among nodes that are ready at the same time the
/// lexically smallest goes first.
pub fn topological_order(graph: &DependencyGraph) -> Result<Vec<&TaskId>, AnalysisError> {
    let mut remaining: HashMap<&TaskId, usize> =
        graph.nodes().map(|id| (id, graph.out_degree(id))).collect();

    let mut ready: BTreeSet<&TaskId> = remaining
        .iter()
        .filter(|(_, deps)| **deps == 0)
        .map(|(id, _)| *id)
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(id) = ready.pop_first() {
        order.push(id);
        for dependent in graph.dependents(id) {
            if let Some(count) = remaining.get_mut(dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.insert(dependent);
                }
            }
        }
    }

    if order.len() < graph.node_count() {
        return Err(AnalysisError::NotADag {
            unresolved: graph.node_count() - order.len(),
        });
    }

    Ok(order)
}

/// Assigns a level to every registered task.
///
/// Dangling nodes never get a level and contribute nothing to their
/// dependents. Fails if the graph has no topological order.
pub fn assign_levels(
    graph: &DependencyGraph,
    registry: &TaskRegistry,
) -> Result<Levels, AnalysisError> {
    let order = topological_order(graph)?;
    let mut levels = Levels::new();

    for id in order {
        if !registry.contains(id) {
            continue;
        }

        let level = graph
            .dependencies(id)
            .filter_map(|dep| levels.get(dep))
            .max()
            .map_or(0, |deepest| deepest + 1);

        levels.insert(id.clone(), level);
    }

    Ok(levels)
}

/// Groups tasks by level, each group sorted by ID
pub fn group_by_level(levels: &Levels) -> BTreeMap<usize, Vec<&TaskId>> {
    let mut groups: BTreeMap<usize, Vec<&TaskId>> = BTreeMap::new();
    for (id, level) in levels {
        groups.entry(*level).or_default().push(id);
    }
    groups
}
