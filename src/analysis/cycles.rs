//! Elementary cycle enumeration.
//!
//! # Algorithm
//!
//! Johnson's circuit search over the dependency graph (dangling nodes
//! included). Nodes are numbered in lexical order. For each start node `s`,
//! the search is restricted to the strongly connected component containing
//! `s` in the subgraph of nodes numbered `>= s`, so every cycle is reported
//! exactly once, starting at its lexically smallest member.
//!
//! Both the circuit search and the unblocking cascade use explicit stacks.
//!
//! # Output
//!
//! A cycle `[a, b, c]` means `a -> b -> c -> a`. A self-loop is the
//! one-element cycle `[a]`.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use tracing::debug;

use super::error::AnalysisError;
use crate::domain::{DependencyGraph, TaskId};

/// One elementary cycle; the closing edge back to the first member is implied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cycle(Vec<TaskId>);

impl Cycle {
    pub fn members(&self) -> &[TaskId] {
        &self.0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.0.iter().map(TaskId::as_str).collect();
        f.write_str(&ids.join(" → "))
    }
}

/// Index-based view of the graph used by the search
struct Indexed<'g> {
    ids: Vec<&'g TaskId>,
    successors: Vec<Vec<usize>>,
}

impl<'g> Indexed<'g> {
    fn new(graph: &'g DependencyGraph) -> Self {
        let ids: Vec<&TaskId> = graph.nodes().collect();
        let index: HashMap<&TaskId, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let successors = ids
            .iter()
            .map(|id| {
                graph
                    .dependencies(id)
                    .filter_map(|dep| index.get(dep).copied())
                    .collect()
            })
            .collect();

        Self { ids, successors }
    }

    /// Nodes reachable from `start` (forward) that can also reach it
    /// (backward), considering only nodes `>= start`.
    fn component_of(&self, start: usize, predecessors: &[Vec<usize>]) -> BTreeSet<usize> {
        let forward = self.reach(start, |v| &self.successors[v]);
        let backward = self.reach(start, |v| &predecessors[v]);
        forward.intersection(&backward).copied().collect()
    }

    fn reach<'a>(&self, start: usize, next: impl Fn(usize) -> &'a Vec<usize>) -> HashSet<usize> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for &w in next(v) {
                if w >= start && seen.insert(w) {
                    queue.push_back(w);
                }
            }
        }
        seen
    }
}

struct Frame {
    node: usize,
    next: usize,
    found: bool,
}

/// Enumerates every elementary cycle in the graph.
///
/// Fails with [`AnalysisError::CycleLimitExceeded`] once more than `limit`
/// cycles have been found.
pub fn find_cycles(graph: &DependencyGraph, limit: usize) -> Result<Vec<Cycle>, AnalysisError> {
    let indexed = Indexed::new(graph);
    let n = indexed.ids.len();

    let mut predecessors = vec![Vec::new(); n];
    for (v, succ) in indexed.successors.iter().enumerate() {
        for &w in succ {
            predecessors[w].push(v);
        }
    }

    let mut cycles: Vec<Vec<usize>> = Vec::new();

    for start in 0..n {
        let component = indexed.component_of(start, &predecessors);
        let has_self_loop = indexed.successors[start].contains(&start);
        if component.len() == 1 && !has_self_loop {
            continue;
        }

        // Successor lists restricted to the component
        let local: HashMap<usize, Vec<usize>> = component
            .iter()
            .map(|&v| {
                let succ = indexed.successors[v]
                    .iter()
                    .copied()
                    .filter(|w| component.contains(w))
                    .collect();
                (v, succ)
            })
            .collect();

        circuits_from(start, &local, &mut cycles, limit)?;
    }

    debug!(count = cycles.len(), "cycle enumeration complete");

    Ok(cycles
        .into_iter()
        .map(|path| Cycle(path.into_iter().map(|i| indexed.ids[i].clone()).collect()))
        .collect())
}

fn circuits_from(
    start: usize,
    successors: &HashMap<usize, Vec<usize>>,
    cycles: &mut Vec<Vec<usize>>,
    limit: usize,
) -> Result<(), AnalysisError> {
    let empty = Vec::new();
    let succ = |v: usize| successors.get(&v).unwrap_or(&empty);

    let mut blocked: HashSet<usize> = HashSet::from([start]);
    let mut block_map: HashMap<usize, HashSet<usize>> = HashMap::new();
    let mut path = vec![start];
    let mut frames = vec![Frame {
        node: start,
        next: 0,
        found: false,
    }];

    while let Some(frame) = frames.last_mut() {
        let v = frame.node;
        let neighbours = succ(v);

        if frame.next < neighbours.len() {
            let w = neighbours[frame.next];
            frame.next += 1;

            if w == start {
                frame.found = true;
                if cycles.len() >= limit {
                    return Err(AnalysisError::CycleLimitExceeded { limit });
                }
                cycles.push(path.clone());
            } else if !blocked.contains(&w) {
                blocked.insert(w);
                path.push(w);
                frames.push(Frame {
                    node: w,
                    next: 0,
                    found: false,
                });
            }
            continue;
        }

        let found = frame.found;
        frames.pop();
        path.pop();

        if found {
            unblock(v, &mut blocked, &mut block_map);
        } else {
            for &w in neighbours {
                block_map.entry(w).or_default().insert(v);
            }
        }

        if let Some(parent) = frames.last_mut() {
            parent.found |= found;
        }
    }

    Ok(())
}

fn unblock(node: usize, blocked: &mut HashSet<usize>, block_map: &mut HashMap<usize, HashSet<usize>>) {
    let mut pending = vec![node];
    while let Some(u) = pending.pop() {
        if !blocked.remove(&u) {
            continue;
        }
        if let Some(waiting) = block_map.remove(&u) {
            pending.extend(waiting.into_iter().filter(|w| blocked.contains(w)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycles_of(edges: &[(&str, &str)]) -> Vec<Vec<String>> {
        let graph = DependencyGraph::from_edges(edges.iter().copied());
        find_cycles(&graph, 1000)
            .unwrap()
            .into_iter()
            .map(|c| c.members().iter().map(|id| id.to_string()).collect())
            .collect()
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        assert!(cycles_of(&[("y", "x"), ("z", "x"), ("z", "y")]).is_empty());
    }

    #[test]
    fn two_node_cycle() {
        assert_eq!(cycles_of(&[("a", "b"), ("b", "a")]), vec![vec!["a", "b"]]);
    }

    #[test]
    fn self_loop_is_length_one_cycle() {
        let graph = DependencyGraph::from_edges([("a", "a")]);
        let cycles = find_cycles(&graph, 10).unwrap();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].members().len(), 1);
        assert_eq!(cycles[0].to_string(), "a");
    }

    #[test]
    fn cycle_starts_at_smallest_member() {
        assert_eq!(
            cycles_of(&[("c", "a"), ("a", "b"), ("b", "c")]),
            vec![vec!["a", "b", "c"]]
        );
    }

    #[test]
    fn overlapping_cycles_are_all_listed() {
        // a -> b -> a and a -> b -> c -> a share the edge a -> b
        let cycles = cycles_of(&[("a", "b"), ("b", "a"), ("b", "c"), ("c", "a")]);
        assert_eq!(cycles, vec![vec!["a", "b"], vec!["a", "b", "c"]]);
    }

    #[test]
    fn complete_graph_on_three_nodes() {
        // Every ordered pair is an edge: 3 two-cycles + 2 three-cycles
        let edges = [
            ("a", "b"),
            ("a", "c"),
            ("b", "a"),
            ("b", "c"),
            ("c", "a"),
            ("c", "b"),
        ];
        assert_eq!(cycles_of(&edges).len(), 5);
    }

    #[test]
    fn disjoint_cycles_and_dangling_nodes() {
        let cycles = cycles_of(&[("a", "b"), ("b", "a"), ("x", "y"), ("y", "x"), ("x", "ghost")]);
        assert_eq!(cycles, vec![vec!["a", "b"], vec!["x", "y"]]);
    }

    #[test]
    fn display_joins_with_arrows() {
        let graph = DependencyGraph::from_edges([("a", "b"), ("b", "a")]);
        let cycles = find_cycles(&graph, 10).unwrap();
        assert_eq!(cycles[0].to_string(), "a → b");
    }

    #[test]
    fn limit_is_enforced() {
        let edges = [
            ("a", "b"),
            ("a", "c"),
            ("b", "a"),
            ("b", "c"),
            ("c", "a"),
            ("c", "b"),
        ];
        let graph = DependencyGraph::from_edges(edges);
        assert_eq!(
            find_cycles(&graph, 2),
            Err(AnalysisError::CycleLimitExceeded { limit: 2 })
        );
    }
}
