//! Domain models for depcheck
//!
//! Task records, the registry that holds them, and the dependency graph built
//! from the registry. No I/O happens here.

mod id;
mod task;
mod registry;
mod graph;

pub use id::{IdError, TaskId};
pub use task::{ParsePriorityError, Priority, SourceLocation, TaskRecord};
pub use registry::{RegistryError, TaskRegistry};
pub use graph::DependencyGraph;
