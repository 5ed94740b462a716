//! Errors raised inside individual analysis stages.
//!
//! None of these escape [`Analyzer::analyze`](super::Analyzer::analyze); the
//! pipeline catches them and degrades the affected stage.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Cycle enumeration stopped after {limit} cycles")]
    CycleLimitExceeded { limit: usize },

    #[error("Dependency graph is not acyclic: {unresolved} node(s) could not be ordered")]
    NotADag { unresolved: usize },
}
