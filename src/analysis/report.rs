//! Analysis result, statistics and the leveled text visualization

use serde::Serialize;

use super::bottleneck::Bottleneck;
use super::cycles::Cycle;
use super::levels::{group_by_level, Levels};
use crate::domain::{TaskId, TaskRegistry};

/// Aggregate counts over one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_tasks: usize,
    pub total_dependencies: usize,
    pub tasks_with_dependencies: usize,
    pub tasks_without_dependencies: usize,
    /// `max(level) + 1`, or 0 when levels could not be computed
    pub max_dependency_depth: usize,
    pub average_dependencies_per_task: f64,
    pub circular_dependencies: usize,
    pub bottleneck_tasks: Vec<Bottleneck>,
}

impl Statistics {
    /// Pure aggregation over the outputs of the other stages
    pub fn collect(
        registry: &TaskRegistry,
        levels: &Levels,
        cycles: &[Cycle],
        bottlenecks: &[Bottleneck],
        top: usize,
    ) -> Self {
        let total_tasks = registry.len();
        let total_dependencies: usize = registry.all().map(|t| t.dependencies().len()).sum();
        let tasks_with_dependencies = registry.all().filter(|t| t.has_dependencies()).count();

        let average_dependencies_per_task = if total_tasks > 0 {
            total_dependencies as f64 / total_tasks as f64
        } else {
            0.0
        };

        Self {
            total_tasks,
            total_dependencies,
            tasks_with_dependencies,
            tasks_without_dependencies: total_tasks - tasks_with_dependencies,
            max_dependency_depth: levels.values().max().map_or(0, |max| max + 1),
            average_dependencies_per_task,
            circular_dependencies: cycles.len(),
            bottleneck_tasks: bottlenecks.iter().take(top).cloned().collect(),
        }
    }
}

/// Everything one `analyze` call produces
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// False when nothing was loaded or any dependency is unresolved (plus,
    /// in strict mode, when there are cycles or warnings)
    pub success: bool,
    pub tasks_loaded: usize,
    pub statistics: Statistics,
    pub circular_dependencies: Vec<Cycle>,
    pub levels: Levels,
    pub critical_path: Vec<TaskId>,
    #[serde(serialize_with = "serialize_pairs")]
    pub bottleneck_tasks: Vec<Bottleneck>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub visualization: String,
}

impl AnalysisResult {
    /// Puts loader errors in front of the analysis errors.
    ///
    /// Load errors are reported but do not change `success`.
    pub fn prepend_errors(&mut self, errors: impl IntoIterator<Item = String>) {
        let mut combined: Vec<String> = errors.into_iter().collect();
        combined.append(&mut self.errors);
        self.errors = combined;
    }

    pub fn has_cycles(&self) -> bool {
        !self.circular_dependencies.is_empty()
    }
}

/// Bottlenecks go out as `[task_id, count]` pairs in the top-level list
fn serialize_pairs<S>(bottlenecks: &[Bottleneck], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    let mut seq = serializer.serialize_seq(Some(bottlenecks.len()))?;
    for b in bottlenecks {
        seq.serialize_element(&(&b.task_id, b.dependents))?;
    }
    seq.end()
}

const VISUALIZATION_TITLE: &str = "Dependency Graph Visualization";

/// Renders tasks grouped by level, lowest level first.
///
/// An empty level map means leveling was impossible, and the output says so
/// instead of showing a partial picture.
pub fn visualize(registry: &TaskRegistry, levels: &Levels) -> String {
    let mut lines = vec![VISUALIZATION_TITLE.to_string(), "=".repeat(40)];

    if levels.is_empty() {
        lines.push("Unable to determine levels due to circular dependencies".to_string());
        return lines.join("\n");
    }

    for (level, ids) in group_by_level(levels) {
        lines.push(String::new());
        lines.push(format!("Level {}:", level));

        for id in ids {
            let Ok(task) = registry.get(id) else {
                continue;
            };

            let deps: Vec<&str> = task.dependencies().into_iter().map(TaskId::as_str).collect();
            if deps.is_empty() {
                lines.push(format!("  └── {}: {} (no dependencies)", id, task.name));
            } else {
                lines.push(format!("  └── {}: {}", id, task.name));
                lines.push(format!("      (depends on: {})", deps.join(", ")));
            }
        }
    }

    lines.join("\n")
}
