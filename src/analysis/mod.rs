//! # Dependency Analysis
//!
//! Stages of the analysis pipeline, each an explicit function over the
//! [`DependencyGraph`](crate::domain::DependencyGraph):
//!
//! | Stage | Function | Output |
//! |-------|----------|--------|
//! | Validation | [`validate`] | unresolved references, priority inversions |
//! | Cycles | [`find_cycles`] | every elementary cycle |
//! | Levels | [`assign_levels`] | depth per task (empty if cyclic) |
//! | Critical path | [`find_critical_path`] | longest root-to-node chain |
//! | Bottlenecks | [`rank_bottlenecks`] | tasks by direct fan-in |
//! | Report | [`Statistics`], [`visualize`] | counts and leveled text |
//!
//! [`Analyzer`] runs them in order and folds everything into one
//! [`AnalysisResult`]. It never returns an error.

mod analyzer;
mod bottleneck;
mod critical_path;
mod cycles;
mod error;
mod levels;
mod matrix;
mod report;
mod validate;

pub use analyzer::{analyze, AnalysisOptions, Analyzer};
pub use bottleneck::{rank_bottlenecks, Bottleneck};
pub use critical_path::{find_critical_path, CriticalPath, SearchBudget};
pub use cycles::{find_cycles, Cycle};
pub use error::AnalysisError;
pub use levels::{assign_levels, group_by_level, topological_order, Levels};
pub use matrix::{dependency_matrix, DependencyMatrix, Relation};
pub use report::{visualize, AnalysisResult, Statistics};
pub use validate::{validate, Validation, ValidationIssue};
