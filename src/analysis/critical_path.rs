//! Critical path search.
//!
//! # Overview
//!
//! The critical path is the longest simple chain of dependency edges starting
//! at a root (a node no task depends on). It names the sequence of tasks that
//! bounds how deep the project's prerequisites go.
//!
//! # Algorithm
//!
//! Bounded depth-first enumeration of simple paths from every root:
//!
//! 1. Roots are visited in lexical order, and so are each node's dependencies.
//! 2. A path never grows past `max(node_count, min_path_length)` edges.
//! 3. Every extension of the current path counts as one explored path. When
//!    another extension is due after `max_paths` have been taken, the search
//!    stops and keeps the best path so far.
//! 4. Only a strictly longer path replaces the current best, so among equally
//!    long paths the first one found in that lexical order wins.
//!
//! Paths have at least two nodes; a graph of isolated nodes, or one with no
//! roots at all (every node sits on or under a cycle), has an empty critical
//! path.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::domain::{DependencyGraph, TaskId};

/// Limits on the exhaustive path search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    /// Lower bound for the maximum path length in edges; the effective bound
    /// is `max(node_count, min_path_length)`
    pub min_path_length: usize,

    /// Stop after exploring this many paths
    pub max_paths: usize,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            min_path_length: 20,
            max_paths: 100_000,
        }
    }
}

/// Result of the critical path search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriticalPath {
    /// Root first, each following node a dependency of the previous one
    pub nodes: Vec<TaskId>,

    /// Number of paths the search looked at
    pub paths_explored: usize,

    /// True if the search stopped on `max_paths` before finishing
    pub exhausted: bool,
}

impl CriticalPath {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

struct Frame<'g> {
    dependencies: Vec<&'g TaskId>,
    next: usize,
}

impl<'g> Frame<'g> {
    fn new(graph: &'g DependencyGraph, id: &TaskId) -> Self {
        Self {
            dependencies: graph.dependencies(id).collect(),
            next: 0,
        }
    }
}

/// Finds the longest simple root-to-node path within the budget
pub fn find_critical_path(graph: &DependencyGraph, budget: &SearchBudget) -> CriticalPath {
    let max_edges = graph.node_count().max(budget.min_path_length);
    let mut result = CriticalPath::default();
    let mut best: Vec<&TaskId> = Vec::new();

    'roots: for root in graph.roots() {
        let mut path = vec![root];
        let mut on_path: HashSet<&TaskId> = HashSet::from([root]);
        let mut frames = vec![Frame::new(graph, root)];

        while let Some(frame) = frames.last_mut() {
            if path.len() > max_edges || frame.next >= frame.dependencies.len() {
                frames.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(done);
                }
                continue;
            }

            let next = frame.dependencies[frame.next];
            frame.next += 1;

            if on_path.contains(next) {
                continue;
            }

            // Only an extension that would actually be taken exceeds the budget
            if result.paths_explored >= budget.max_paths {
                result.exhausted = true;
                break 'roots;
            }

            on_path.insert(next);
            path.push(next);
            frames.push(Frame::new(graph, next));
            result.paths_explored += 1;

            if path.len() > best.len() {
                best = path.clone();
            }
        }
    }

    if result.exhausted {
        warn!(
            paths = result.paths_explored,
            best = best.len(),
            "critical path search budget exhausted, keeping best path found"
        );
    } else {
        debug!(
            paths = result.paths_explored,
            length = best.len(),
            "critical path search complete"
        );
    }

    result.nodes = best.into_iter().cloned().collect();
    result
}
