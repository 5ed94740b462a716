//! Dependency graph for tasks
//!
//! Node = task ID, edge `A -> B` = "A depends on B". The graph is an
//! adjacency list plus a reverse adjacency list, both keyed by ordered maps so
//! that every traversal visits nodes in lexical order.
//!
//! Edges are added even when the target is not a registered task. Such
//! dangling nodes exist only as edge targets; flagging them is the
//! validator's job.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::id::TaskId;
use super::registry::TaskRegistry;

/// A directed dependency graph, built once per analysis run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DependencyGraph {
    /// node -> nodes it depends on
    adjacency: BTreeMap<TaskId, BTreeSet<TaskId>>,

    /// node -> nodes that depend on it
    reverse: BTreeMap<TaskId, BTreeSet<TaskId>>,

    edge_count: usize,
}

impl DependencyGraph {
    /// Creates an empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from every registered task and its hard and soft
    /// dependencies
    pub fn from_registry(registry: &TaskRegistry) -> Self {
        let mut graph = Self::new();

        // First pass: add all registered tasks as nodes
        for task in registry.all() {
            graph.add_node(task.id.clone());
        }

        // Second pass: add all edges, creating dangling nodes as needed
        for task in registry.all() {
            for dep_id in task.dependencies() {
                graph.add_edge(&task.id, dep_id);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );
        graph
    }

    /// Builds a graph from `(task, dependency)` pairs
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut graph = Self::new();
        for (task, dep) in edges {
            graph.add_edge(&TaskId::new(task), &TaskId::new(dep));
        }
        graph
    }

    fn add_node(&mut self, id: TaskId) {
        if !self.adjacency.contains_key(&id) {
            self.adjacency.insert(id.clone(), BTreeSet::new());
            self.reverse.insert(id, BTreeSet::new());
        }
    }

    fn add_edge(&mut self, task: &TaskId, depends_on: &TaskId) {
        self.add_node(task.clone());
        self.add_node(depends_on.clone());

        let inserted = self
            .adjacency
            .get_mut(task)
            .is_some_and(|deps| deps.insert(depends_on.clone()));

        if inserted {
            if let Some(dependents) = self.reverse.get_mut(depends_on) {
                dependents.insert(task.clone());
            }
            self.edge_count += 1;
        }
    }

    /// Returns the direct dependencies of a task (outgoing edges)
    pub fn dependencies(&self, id: &TaskId) -> impl Iterator<Item = &TaskId> {
        self.adjacency.get(id).into_iter().flatten()
    }

    /// Returns the direct dependents of a task (incoming edges)
    pub fn dependents(&self, id: &TaskId) -> impl Iterator<Item = &TaskId> {
        self.reverse.get(id).into_iter().flatten()
    }

    /// Number of tasks depending on this one
    pub fn in_degree(&self, id: &TaskId) -> usize {
        self.reverse.get(id).map_or(0, BTreeSet::len)
    }

    /// Number of dependencies of this task
    pub fn out_degree(&self, id: &TaskId) -> usize {
        self.adjacency.get(id).map_or(0, BTreeSet::len)
    }

    /// Nodes nothing depends on, in lexical order
    pub fn roots(&self) -> Vec<&TaskId> {
        self.reverse
            .iter()
            .filter(|(_, dependents)| dependents.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn has_self_loop(&self, id: &TaskId) -> bool {
        self.adjacency.get(id).is_some_and(|deps| deps.contains(id))
    }

    /// All nodes, registered and dangling, in lexical order
    pub fn nodes(&self) -> impl Iterator<Item = &TaskId> {
        self.adjacency.keys()
    }

    /// Returns true if the graph contains the node
    pub fn contains(&self, id: &TaskId) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskRecord;

    fn id(s: &str) -> TaskId {
        TaskId::new(s)
    }

    fn ids<'a>(iter: impl Iterator<Item = &'a TaskId>) -> Vec<&'a str> {
        iter.map(TaskId::as_str).collect()
    }

    #[test]
    fn empty_graph() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert!(graph.roots().is_empty());
    }

    #[test]
    fn from_registry_adds_edges_both_directions() {
        let a = TaskRecord::new(id("a"), "A");
        let mut b = TaskRecord::new(id("b"), "B");
        b.depends_on(id("a"));
        let mut c = TaskRecord::new(id("c"), "C");
        c.prefers_after(id("a"));

        let registry = TaskRegistry::from_records([a, b, c]).unwrap();
        let graph = DependencyGraph::from_registry(&registry);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(ids(graph.dependencies(&id("b"))), vec!["a"]);
        assert_eq!(ids(graph.dependents(&id("a"))), vec!["b", "c"]);
        assert_eq!(graph.in_degree(&id("a")), 2);
        assert_eq!(graph.out_degree(&id("a")), 0);
    }

    #[test]
    fn dangling_target_becomes_node() {
        let mut a = TaskRecord::new(id("a"), "A");
        a.depends_on(id("missing"));

        let registry = TaskRegistry::from_records([a]).unwrap();
        let graph = DependencyGraph::from_registry(&registry);

        assert!(graph.contains(&id("missing")));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(ids(graph.dependents(&id("missing"))), vec!["a"]);
    }

    #[test]
    fn hard_and_soft_on_same_target_is_one_edge() {
        let mut a = TaskRecord::new(id("a"), "A");
        a.depends_on(id("b"));
        a.prefers_after(id("b"));

        let registry =
            TaskRegistry::from_records([a, TaskRecord::new(id("b"), "B")]).unwrap();
        let graph = DependencyGraph::from_registry(&registry);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn self_loop_is_kept() {
        let graph = DependencyGraph::from_edges([("a", "a")]);
        assert!(graph.has_self_loop(&id("a")));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.roots().is_empty());
    }

    #[test]
    fn roots_are_nodes_without_dependents() {
        let graph = DependencyGraph::from_edges([("y", "x"), ("z", "x")]);
        assert_eq!(ids(graph.roots().into_iter()), vec!["y", "z"]);
    }

    #[test]
    fn unknown_node_has_no_neighbours() {
        let graph = DependencyGraph::from_edges([("a", "b")]);
        assert_eq!(graph.dependencies(&id("zzz")).count(), 0);
        assert_eq!(graph.in_degree(&id("zzz")), 0);
    }
}
