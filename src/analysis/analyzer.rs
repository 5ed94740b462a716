//! The analysis pipeline
//!
//! Registry -> graph -> validation, cycles, levels, critical path,
//! bottlenecks -> statistics and visualization. Each call builds its own graph
//! and shares nothing with other calls, so independent analyses can run on
//! separate threads.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::bottleneck::rank_bottlenecks;
use super::critical_path::{find_critical_path, SearchBudget};
use super::cycles::find_cycles;
use super::levels::{assign_levels, Levels};
use super::report::{visualize, AnalysisResult, Statistics};
use super::validate::validate;
use crate::domain::{DependencyGraph, TaskRegistry};

/// Tunables for one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Cycles and warnings also make the run unsuccessful
    pub strict: bool,

    /// Critical path search limits
    #[serde(flatten)]
    pub search: SearchBudget,

    /// Stop enumerating cycles after this many
    pub max_cycles: usize,

    /// Number of bottlenecks kept in the statistics block
    pub bottleneck_top: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            strict: false,
            search: SearchBudget::default(),
            max_cycles: 10_000,
            bottleneck_top: 5,
        }
    }
}

/// Runs the analysis pipeline over a task registry
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalysisOptions,
}

impl Analyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    /// Analyzes the registered tasks.
    ///
    /// Never fails: stage failures are recorded in `errors`/`warnings` and the
    /// affected stage contributes empty output.
    pub fn analyze(&self, registry: &TaskRegistry) -> AnalysisResult {
        if registry.is_empty() {
            error!("no valid tasks loaded");
            return AnalysisResult {
                success: false,
                errors: vec!["No valid tasks loaded".to_string()],
                ..AnalysisResult::default()
            };
        }

        info!(tasks = registry.len(), "analyzing task dependencies");

        let graph = DependencyGraph::from_registry(registry);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let validation = validate(registry);
        let unresolved = validation.errors.len();
        errors.extend(validation.errors.iter().map(ToString::to_string));
        warnings.extend(validation.warnings.iter().map(ToString::to_string));
        debug!(
            errors = unresolved,
            warnings = validation.warnings.len(),
            "validation complete"
        );

        let cycles = match find_cycles(&graph, self.options.max_cycles) {
            Ok(cycles) => cycles,
            Err(e) => {
                error!(error = %e, "cycle detection failed");
                errors.push(format!("Error detecting circular dependencies: {}", e));
                Vec::new()
            }
        };
        for (i, cycle) in cycles.iter().enumerate() {
            debug!("circular dependency {}: {}", i + 1, cycle);
        }

        let levels = if cycles.is_empty() {
            match assign_levels(&graph, registry) {
                Ok(levels) => levels,
                Err(e) => {
                    error!(error = %e, "level assignment failed");
                    errors.push(format!("Cannot calculate task levels: {}", e));
                    Levels::new()
                }
            }
        } else {
            errors.push(format!(
                "Cannot calculate task levels: {} circular dependency cycle(s) found",
                cycles.len()
            ));
            Levels::new()
        };

        let critical_path = find_critical_path(&graph, &self.options.search);
        if critical_path.exhausted {
            warnings.push(format!(
                "Critical path search stopped after {} paths; result may not be the longest path",
                critical_path.paths_explored
            ));
        }

        let bottlenecks = rank_bottlenecks(&graph, registry);
        let statistics = Statistics::collect(
            registry,
            &levels,
            &cycles,
            &bottlenecks,
            self.options.bottleneck_top,
        );
        let visualization = visualize(registry, &levels);

        let mut success = unresolved == 0;
        if self.options.strict {
            success = success && cycles.is_empty() && warnings.is_empty();
        }

        info!(
            success,
            cycles = cycles.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "analysis complete"
        );

        AnalysisResult {
            success,
            tasks_loaded: registry.len(),
            statistics,
            circular_dependencies: cycles,
            levels,
            critical_path: critical_path.nodes,
            bottleneck_tasks: bottlenecks,
            errors,
            warnings,
            visualization,
        }
    }
}

/// Analyzes with default options
pub fn analyze(registry: &TaskRegistry) -> AnalysisResult {
    Analyzer::default().analyze(registry)
}
