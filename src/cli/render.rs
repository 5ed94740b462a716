//! Text rendering of analysis results

use crate::analysis::{AnalysisResult, DependencyMatrix, Relation};
use crate::domain::{TaskId, TaskRegistry};

const RULE_WIDTH: usize = 40;

/// Renders the full analysis report as plain text
pub fn report(result: &AnalysisResult, registry: &TaskRegistry, show_graph: bool) -> String {
    let stats = &result.statistics;
    let mut lines = vec![
        "Task Dependency Analysis Report".to_string(),
        "=".repeat(RULE_WIDTH),
    ];
    lines.push(if result.success {
        "[ok] Analysis completed successfully".to_string()
    } else {
        "[!!] Analysis found issues".to_string()
    });

    lines.push(String::new());
    lines.push("Statistics:".to_string());
    lines.push(format!("  Total tasks: {}", stats.total_tasks));
    lines.push(format!("  Total dependencies: {}", stats.total_dependencies));
    lines.push(format!("  Tasks with dependencies: {}", stats.tasks_with_dependencies));
    lines.push(format!(
        "  Tasks without dependencies: {}",
        stats.tasks_without_dependencies
    ));
    lines.push(format!("  Max dependency depth: {}", stats.max_dependency_depth));
    lines.push(format!(
        "  Average dependencies per task: {:.2}",
        stats.average_dependencies_per_task
    ));

    if result.has_cycles() {
        lines.push(String::new());
        lines.push(format!(
            "Circular Dependencies ({}):",
            result.circular_dependencies.len()
        ));
        lines.extend(
            result
                .circular_dependencies
                .iter()
                .enumerate()
                .map(|(i, cycle)| format!("  {}. {}", i + 1, cycle)),
        );
    }

    if !result.critical_path.is_empty() {
        let path: Vec<&str> = result.critical_path.iter().map(TaskId::as_str).collect();
        lines.push(String::new());
        lines.push(format!("Critical Path ({} tasks):", path.len()));
        lines.push(format!("  {}", path.join(" → ")));
    }

    if !stats.bottleneck_tasks.is_empty() {
        lines.push(String::new());
        lines.push("Bottleneck Tasks:".to_string());
        for bottleneck in &stats.bottleneck_tasks {
            let name = registry
                .get(&bottleneck.task_id)
                .map(|t| t.name.as_str())
                .unwrap_or("Unnamed");
            lines.push(format!(
                "  {}: {} ({} dependents)",
                bottleneck.task_id, name, bottleneck.dependents
            ));
        }
    }

    section(&mut lines, "Warnings", &result.warnings);
    section(&mut lines, "Errors", &result.errors);

    if show_graph && !result.visualization.is_empty() {
        lines.push(String::new());
        lines.push(result.visualization.clone());
    }

    lines.join("\n")
}

fn section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{} ({}):", title, items.len()));
    lines.extend(items.iter().map(|item| format!("  • {}", item)));
}

/// Renders the dependency matrix as a symbol table with a legend
pub fn matrix(matrix: &DependencyMatrix) -> String {
    let ids: Vec<&TaskId> = matrix.keys().collect();
    let width = ids.iter().map(|id| id.as_str().len()).max().unwrap_or(0);

    let mut lines = vec![
        format!("Dependency Matrix ({} tasks)", ids.len()),
        "=".repeat(RULE_WIDTH),
        format!("{:>width$}  {}", "", column_indices(ids.len()), width = width),
    ];

    for (row, cells) in matrix {
        let symbols: String = cells
            .values()
            .map(|r| format!("{:<3}", r.symbol()))
            .collect();
        lines.push(format!(
            "{:>width$}  {}",
            row,
            symbols.trim_end(),
            width = width
        ));
    }

    lines.push(String::new());
    lines.push("Columns:".to_string());
    lines.extend(
        ids.iter()
            .enumerate()
            .map(|(i, id)| format!("  {:<3}{}", i + 1, id)),
    );

    let legend: Vec<String> = [
        Relation::DependsOn,
        Relation::DependencyOf,
        Relation::Independent,
        Relation::SelfRef,
    ]
    .iter()
    .map(|r| format!("{} {}", r.symbol(), r))
    .collect();
    lines.push(String::new());
    lines.push(format!("Legend: {}", legend.join(", ")));

    lines.join("\n")
}

fn column_indices(count: usize) -> String {
    (1..=count)
        .map(|i| format!("{:<3}", i))
        .collect::<String>()
        .trim_end()
        .to_string()
}
