//! Analysis commands (check, levels, matrix)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;

use super::output::Output;
use super::render;
use crate::analysis::{dependency_matrix, AnalysisOptions, Analyzer};
use crate::storage::{LoadOutcome, TaskLoader};

/// Discovers and loads task files, logging what happened
fn load(paths: &[PathBuf]) -> Result<LoadOutcome> {
    let loader = TaskLoader::new();
    let files = loader.discover(paths)?;
    debug!(files = files.len(), "analyzing task files");

    let outcome = loader.load(&files);
    debug!(
        loaded = outcome.registry.len(),
        failed = outcome.errors.len(),
        "task files loaded"
    );
    Ok(outcome)
}

/// Runs the full analysis and prints the report.
///
/// Exits with failure when the analysis is not successful.
pub fn check(
    output: &Output,
    paths: &[PathBuf],
    options: AnalysisOptions,
    show_graph: bool,
    dest: Option<&Path>,
) -> Result<ExitCode> {
    let outcome = load(paths)?;

    let mut result = Analyzer::new(options).analyze(&outcome.registry);
    result.prepend_errors(outcome.error_messages());

    let content = match output.serialize(&result)? {
        Some(structured) => structured,
        None => render::report(&result, &outcome.registry, show_graph),
    };
    output.emit(&content, dest)?;

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Prints the leveled dependency visualization
pub fn levels(output: &Output, paths: &[PathBuf], options: AnalysisOptions) -> Result<ExitCode> {
    let outcome = load(paths)?;
    if outcome.registry.is_empty() {
        output.error("No valid tasks loaded");
        return Ok(ExitCode::FAILURE);
    }

    let result = Analyzer::new(options).analyze(&outcome.registry);

    let structured = output.serialize(&serde_json::json!({
        "levels": result.levels,
        "circular_dependencies": result.circular_dependencies,
        "visualization": result.visualization,
    }))?;
    let content = structured.unwrap_or_else(|| result.visualization.clone());
    output.emit(&content, None)?;

    Ok(if result.levels.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Prints the pairwise dependency matrix
pub fn matrix(output: &Output, paths: &[PathBuf]) -> Result<ExitCode> {
    let outcome = load(paths)?;
    if outcome.registry.is_empty() {
        output.error("No valid tasks loaded");
        return Ok(ExitCode::FAILURE);
    }

    let matrix = dependency_matrix(&outcome.registry);
    let content = match output.serialize(&matrix)? {
        Some(structured) => structured,
        None => render::matrix(&matrix),
    };
    output.emit(&content, None)?;

    Ok(ExitCode::SUCCESS)
}
