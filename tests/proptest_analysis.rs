//! Property-based tests for dependency analysis invariants.
//!
//! These tests verify the behavioral contracts of the analyzer:
//! - Results do not depend on the order tasks were registered in
//! - Every dependency sits on a strictly lower level than its dependent
//! - Cycle detection finds exactly the elementary cycles, and agrees with an
//!   independent cyclicity check
//! - Bottleneck counts match the number of distinct dependents

use depcheck::analysis::{analyze, find_cycles};
use depcheck::{DependencyGraph, TaskId, TaskRecord, TaskRegistry};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Task specs as `(id, hard dependencies)`
type Spec = Vec<(String, Vec<String>)>;

fn name(i: usize) -> String {
    format!("t{i:02}")
}

/// Generate a DAG by only allowing dependencies on lower-indexed tasks
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = Spec> {
    (1..=max_tasks).prop_flat_map(|count| {
        let deps: Vec<_> = (0..count)
            .map(|i| {
                if i == 0 {
                    Just(BTreeSet::new()).boxed()
                } else {
                    proptest::collection::btree_set(0..i, 0..=i.min(3)).boxed()
                }
            })
            .collect();

        deps.prop_map(|all| {
            all.into_iter()
                .enumerate()
                .map(|(i, deps)| (name(i), deps.into_iter().map(name).collect()))
                .collect()
        })
    })
}

/// Generate an arbitrary graph, self-loops and cycles included
fn any_graph_strategy(max_tasks: usize) -> impl Strategy<Value = Spec> {
    (1..=max_tasks).prop_flat_map(|count| {
        proptest::collection::vec(proptest::collection::btree_set(0..count, 0..=2), count)
            .prop_map(|all| {
                all.into_iter()
                    .enumerate()
                    .map(|(i, deps)| (name(i), deps.into_iter().map(name).collect()))
                    .collect()
            })
    })
}

/// Generate a DAG and then close one cycle through it
fn cyclic_strategy(max_tasks: usize) -> impl Strategy<Value = Spec> {
    dag_strategy(max_tasks).prop_flat_map(|spec| {
        let count = spec.len();
        (Just(spec), 0..count, 0..count).prop_map(|(mut spec, a, b)| {
            let (low, high) = (a.min(b), a.max(b));
            // low == high gives a self-loop
            spec[high].1.push(name(low));
            spec[low].1.push(name(high));
            spec
        })
    })
}

fn registry(spec: &Spec) -> TaskRegistry {
    let records = spec.iter().map(|(id, deps)| {
        let mut record = TaskRecord::new(TaskId::new(id.as_str()), format!("Task {id}"));
        for dep in deps {
            record.depends_on(TaskId::new(dep.as_str()));
        }
        record
    });
    TaskRegistry::from_records(records).unwrap()
}

fn reference_graph(spec: &Spec) -> DiGraph<(), ()> {
    let mut graph = DiGraph::new();
    let nodes: Vec<_> = spec.iter().map(|_| graph.add_node(())).collect();
    let index = |id: &str| spec.iter().position(|(n, _)| n == id);

    for (i, (_, deps)) in spec.iter().enumerate() {
        for dep in deps {
            if let Some(j) = index(dep.as_str()) {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
    }
    graph
}

/// Every elementary cycle, written from its lowest-indexed member.
///
/// Plain enumeration of simple paths that only visit nodes above the start.
fn brute_force_cycles(spec: &Spec) -> BTreeSet<Vec<String>> {
    let index = |id: &str| spec.iter().position(|(n, _)| n == id);
    let successors: Vec<Vec<usize>> = spec
        .iter()
        .map(|(_, deps)| deps.iter().filter_map(|d| index(d.as_str())).collect())
        .collect();

    let mut found = BTreeSet::new();
    for start in 0..spec.len() {
        let mut stack = vec![vec![start]];
        while let Some(path) = stack.pop() {
            let last = *path.last().unwrap();
            for &next in &successors[last] {
                if next == start {
                    found.insert(path.iter().map(|&i| spec[i].0.clone()).collect());
                } else if next > start && !path.contains(&next) {
                    let mut extended = path.clone();
                    extended.push(next);
                    stack.push(extended);
                }
            }
        }
    }
    found
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn analysis_ignores_registration_order(spec in any_graph_strategy(7)) {
        let forward = analyze(&registry(&spec));

        let mut reversed = spec.clone();
        reversed.reverse();
        for (_, deps) in &mut reversed {
            deps.reverse();
        }
        let backward = analyze(&registry(&reversed));

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn dependencies_sit_on_lower_levels(spec in dag_strategy(12)) {
        let result = analyze(&registry(&spec));

        prop_assert!(result.circular_dependencies.is_empty());
        prop_assert_eq!(result.levels.len(), spec.len());

        for (id, deps) in &spec {
            let level = result.levels[id.as_str()];
            for dep in deps {
                prop_assert!(
                    level > result.levels[dep.as_str()],
                    "{} (level {}) depends on {}", id, level, dep
                );
            }
            if deps.is_empty() {
                prop_assert_eq!(level, 0);
            }
        }
    }

    #[test]
    fn cyclic_graphs_have_no_levels(spec in cyclic_strategy(8)) {
        let result = analyze(&registry(&spec));

        prop_assert!(!result.circular_dependencies.is_empty());
        prop_assert!(result.levels.is_empty());
        prop_assert!(result
            .errors
            .iter()
            .any(|e| e.starts_with("Cannot calculate task levels")));
    }

    #[test]
    fn cycle_detection_matches_reference(spec in any_graph_strategy(7)) {
        let edges: Vec<(&str, &str)> = spec
            .iter()
            .flat_map(|(id, deps)| deps.iter().map(move |d| (id.as_str(), d.as_str())))
            .collect();
        let graph = DependencyGraph::from_edges(edges);
        let cycles = find_cycles(&graph, 10_000).unwrap();

        prop_assert_eq!(!cycles.is_empty(), is_cyclic_directed(&reference_graph(&spec)));

        let expected = brute_force_cycles(&spec);
        let reported: BTreeSet<Vec<String>> = cycles
            .iter()
            .map(|c| c.members().iter().map(|id| id.to_string()).collect())
            .collect();
        prop_assert_eq!(cycles.len(), expected.len());
        prop_assert_eq!(reported, expected);

        // Every reported cycle is a closed walk over distinct nodes
        for cycle in &cycles {
            let members = cycle.members();
            let distinct: BTreeSet<_> = members.iter().collect();
            prop_assert_eq!(distinct.len(), members.len());
            for (i, from) in members.iter().enumerate() {
                let to = &members[(i + 1) % members.len()];
                prop_assert!(graph.dependencies(from).any(|d| d == to));
            }
        }
    }

    #[test]
    fn bottleneck_counts_match_dependents(spec in any_graph_strategy(8)) {
        let result = analyze(&registry(&spec));

        for (id, _) in &spec {
            let dependents = spec
                .iter()
                .filter(|(other, deps)| other != id && deps.contains(id))
                .count();
            let reported = result
                .bottleneck_tasks
                .iter()
                .find(|b| b.task_id.as_str() == id)
                .map_or(0, |b| b.dependents);
            prop_assert_eq!(reported, dependents, "dependents of {}", id);
        }

        for pair in result.bottleneck_tasks.windows(2) {
            prop_assert!(
                (pair[0].dependents, &pair[1].task_id) > (pair[1].dependents, &pair[0].task_id)
            );
        }
    }
}
