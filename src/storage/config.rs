//! Configuration handling for depcheck
//!
//! Configuration is read from `depcheck.toml` (project, found by walking up
//! from the current directory, or given with `--config`) and
//! `~/.config/depcheck/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::AnalysisOptions;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "depcheck.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Analysis tunables
    pub analysis: AnalysisOptions,
}

impl ProjectConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.search.max_paths == 0 {
            return Err(ConfigError::Invalid(
                "analysis.max_paths must be at least 1".to_string(),
            ));
        }
        if self.analysis.max_cycles == 0 {
            return Err(ConfigError::Invalid(
                "analysis.max_cycles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format when `--format` is not given
    pub default_format: Option<ReportFormat>,
}

/// Output format names accepted in configuration files
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Text,
    Json,
    Yaml,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations, or from an explicit
    /// project file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let global = Self::load_global()?;

        let project_file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::find_project_file(),
        };

        let project = match &project_file {
            Some(path) => Self::load_project_config(path)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_file,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "depcheck", "depcheck").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads and validates a project configuration file
    fn load_project_config(config_path: &Path) -> Result<ProjectConfig> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .validate()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds `depcheck.toml` in the current directory or any parent
    pub fn find_project_file() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_file_from(&current)
    }

    fn find_project_file_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert!(!config.project.analysis.strict);
        assert_eq!(config.project.analysis.bottleneck_top, 5);
        assert_eq!(config.project.analysis.search.min_path_length, 20);
        assert_eq!(config.global.default_format, None);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
[analysis]
strict = true
min_path_length = 50
max_paths = 500
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert!(config.analysis.strict);
        assert_eq!(config.analysis.search.min_path_length, 50);
        assert_eq!(config.analysis.search.max_paths, 500);
        assert_eq!(config.analysis.max_cycles, 10_000);
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, Some(ReportFormat::Json));
    }

    #[test]
    fn find_project_file_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let found = Config::find_project_file_from(&sub_dir);
        assert_eq!(found, Some(dir.path().join(PROJECT_CONFIG_FILE)));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[analysis]\nbottleneck_top = 2\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.project.analysis.bottleneck_top, 2);
        assert_eq!(config.project_file, Some(path));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[analysis]\nmax_paths = 0\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
