use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::Severity;

/// Top-level configuration from `.logsift.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Defaults for the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Source text encoding (utf-8 or latin-1).
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Per-file line cap, 0 = unlimited.
    #[serde(default)]
    pub max_lines: usize,
    /// Rule definition file. Built-in rules apply when unset or missing.
    #[serde(default)]
    pub rules: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            max_lines: 0,
            rules: None,
        }
    }
}

/// Reporting behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Minimum finding severity for a nonzero CLI exit code.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            fail_on: default_fail_on(),
        }
    }
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_fail_on() -> Severity {
    Severity::High
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# logsift configuration

[analysis]
# Source text encoding (utf-8, latin-1).
encoding = "utf-8"

# Per-file line cap; 0 means unlimited.
max_lines = 0

# Rule definition file. Comment out to use the built-in rules.
# rules = "rules.json"

[reporting]
# Minimum finding severity for exit code 1 (info, low, medium, high, critical).
fail_on = "high"
"#
    }
}
