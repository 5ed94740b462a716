//! Output formatting for CLI commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::storage::ReportFormat;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl From<ReportFormat> for OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Text => OutputFormat::Text,
            ReportFormat::Json => OutputFormat::Json,
            ReportFormat::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
            OutputFormat::Yaml => println!("success: true\nmessage: {:?}", message),
        }
    }

    /// Prints an error message
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {}", message),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "error": message
                    })
                );
            }
            OutputFormat::Yaml => eprintln!("success: false\nerror: {:?}", message),
        }
    }

    /// Serializes structured data in the structured formats.
    ///
    /// Returns `None` for text, where the caller renders its own layout.
    pub fn serialize<T: Serialize>(&self, data: &T) -> Result<Option<String>> {
        match self.format {
            OutputFormat::Text => Ok(None),
            OutputFormat::Json => serde_json::to_string_pretty(data)
                .map(Some)
                .context("Failed to serialize JSON output"),
            OutputFormat::Yaml => serde_yaml::to_string(data)
                .map(Some)
                .context("Failed to serialize YAML output"),
        }
    }

    /// Prints a rendered document, or writes it to `dest` when given
    pub fn emit(&self, content: &str, dest: Option<&Path>) -> Result<()> {
        match dest {
            Some(path) => {
                let text = format!("{}\n", content.trim_end());
                fs::write(path, text)
                    .with_context(|| format!("Failed to write report: {}", path.display()))?;
                self.success(&format!("Report saved to: {}", path.display()));
            }
            None => println!("{}", content.trim_end()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn text_does_not_serialize() {
        let output = Output::new(OutputFormat::Text);
        assert!(output.serialize(&vec![1, 2]).unwrap().is_none());
    }

    #[test]
    fn json_and_yaml_serialize() {
        let json = Output::new(OutputFormat::Json)
            .serialize(&serde_json::json!({"a": 1}))
            .unwrap()
            .unwrap();
        assert!(json.contains("\"a\": 1"));

        let yaml = Output::new(OutputFormat::Yaml)
            .serialize(&serde_json::json!({"a": 1}))
            .unwrap()
            .unwrap();
        assert_eq!(yaml.trim(), "a: 1");
    }

    #[test]
    fn emit_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        Output::new(OutputFormat::Text)
            .emit("hello", Some(&path))
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn config_format_maps_to_output_format() {
        assert_eq!(OutputFormat::from(ReportFormat::Yaml), OutputFormat::Yaml);
    }
}
