//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::check;
use super::output::{Output, OutputFormat};
use crate::analysis::AnalysisOptions;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "depcheck")]
#[command(author, version, about = "Analyze task dependencies for hierarchical task orchestration")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project configuration file (defaults to the nearest depcheck.toml)
    #[arg(long, global = true, env = "DEPCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Task file arguments shared by every command
#[derive(Args, Debug)]
pub struct Inputs {
    /// Task files or directories (defaults to the current directory)
    pub paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze dependencies and report cycles, critical path and bottlenecks
    Check {
        #[command(flatten)]
        inputs: Inputs,

        /// Treat cycles and warnings as failures
        #[arg(long)]
        strict: bool,

        /// Minimum path length bound for the critical path search
        #[arg(long)]
        max_depth: Option<usize>,

        /// Maximum number of paths the critical path search explores
        #[arg(long)]
        max_paths: Option<usize>,

        /// Include the leveled dependency visualization
        #[arg(long)]
        graph: bool,

        /// Write the report to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show tasks grouped by dependency level
    Levels {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Show the pairwise dependency matrix
    Matrix {
        #[command(flatten)]
        inputs: Inputs,
    },
}

/// Sets up logging to stderr.
///
/// `DEPCHECK_LOG` takes precedence; otherwise `--verbose` switches from
/// warnings to debug output.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("DEPCHECK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "depcheck=debug"
        } else {
            "depcheck=warn"
        })
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &config.project_file {
        tracing::debug!("using config {}", path.display());
    }

    let format = cli
        .format
        .or_else(|| config.global.default_format.map(OutputFormat::from))
        .unwrap_or_default();
    let output = Output::new(format);
    let mut options: AnalysisOptions = config.project.analysis.clone();

    let code = match cli.command {
        Commands::Check {
            inputs,
            strict,
            max_depth,
            max_paths,
            graph,
            output: dest,
        } => {
            options.strict |= strict;
            if let Some(depth) = max_depth {
                options.search.min_path_length = depth;
            }
            if let Some(paths) = max_paths {
                anyhow::ensure!(paths > 0, "--max-paths must be at least 1");
                options.search.max_paths = paths;
            }
            check::check(
                &output,
                &inputs.paths,
                options,
                graph || cli.verbose,
                dest.as_deref(),
            )?
        }

        Commands::Levels { inputs } => check::levels(&output, &inputs.paths, options)?,
        Commands::Matrix { inputs } => check::matrix(&output, &inputs.paths)?,
    };

    tracing::debug!("command completed");
    Ok(code)
}
