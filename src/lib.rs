//! depcheck - dependency graph analysis for declarative task definitions
//!
//! Loads task records (each naming hard and soft dependencies on other
//! tasks), builds the dependency graph, and reports unresolved references,
//! priority inversions, cycles, levels, the critical path and bottlenecks.
//!
//! The analysis is a pure function of the loaded tasks:
//!
//! ```
//! use depcheck::{analyze, TaskId, TaskRecord, TaskRegistry};
//!
//! let fetch = TaskRecord::new(TaskId::new("fetch"), "Fetch sources");
//! let mut build = TaskRecord::new(TaskId::new("build"), "Build");
//! build.depends_on(TaskId::new("fetch"));
//!
//! let registry = TaskRegistry::from_records([fetch, build]).unwrap();
//! let result = analyze(&registry);
//!
//! assert!(result.success);
//! assert_eq!(result.statistics.max_dependency_depth, 2);
//! ```

pub mod domain;
pub mod analysis;
pub mod storage;
pub mod cli;

pub use analysis::{analyze, AnalysisOptions, AnalysisResult, Analyzer};
pub use domain::{DependencyGraph, Priority, TaskId, TaskRecord, TaskRegistry};
