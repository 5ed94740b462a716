//! # Command-Line Interface
//!
//! User-facing commands and report rendering.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `check` | Full analysis report; exits non-zero when the analysis fails |
//! | `levels` | Tasks grouped by dependency level |
//! | `matrix` | Pairwise relation between every two tasks |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//! - `yaml` - YAML
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr, or set `DEPCHECK_LOG`
//! to any `tracing` filter:
//! ```bash
//! DEPCHECK_LOG=depcheck=trace depcheck check tasks/
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod check;
mod output;
mod render;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
