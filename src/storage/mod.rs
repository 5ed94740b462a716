//! # Storage Layer
//!
//! Everything that touches the file system: reading task definitions and
//! reading configuration. The analysis core never does I/O.
//!
//! ## Files
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | YAML or JSON, one task per file | any path given on the command line |
//! | Project config | TOML | `depcheck.toml` (nearest ancestor) or `--config` |
//! | Global config | TOML | `~/.config/depcheck/config.toml` |
//!
//! ## Key Types
//!
//! - [`TaskLoader`] - Discover and parse task files into a registry
//! - [`Config`] - Project and global configuration

mod loader;
mod config;

pub use loader::{LoadError, LoadOutcome, TaskLoader};
pub use config::{Config, ConfigError, GlobalConfig, ProjectConfig, ReportFormat, PROJECT_CONFIG_FILE};
