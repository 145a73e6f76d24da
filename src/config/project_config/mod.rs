//! Project-level configuration support
//!
//! Loads configuration from `lhr-report.toml` or `.lhr-reportrc.json` in the
//! given directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # lhr-report.toml
//!
//! [grouping]
//! flat_clumps = ["passed"]   # clumps rendered without group runs
//!
//! [output]
//! format = "text"
//! no_color = false
//! show_passed = true
//! ```

use crate::clumps::GroupingPolicy;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Preferred configuration file name
pub const CONFIG_FILE_NAME: &str = "lhr-report.toml";

const JSON_CONFIG_FILE_NAME: &str = ".lhr-reportrc.json";

/// Commented default configuration written by `lhr-report init`
pub const DEFAULT_CONFIG: &str = r#"# lhr-report configuration

[grouping]
# Clumps rendered as a single flat list instead of group runs.
# Valid clumps: failed, warning, manual, passed, notApplicable
flat_clumps = ["passed"]

[output]
# Default output format (text, json)
format = "text"

# Disable ANSI colors in text output
no_color = false

# List passed audits individually in text output
show_passed = true
"#;

/// Project-level configuration loaded from lhr-report.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Which clumps are split into group runs
    #[serde(default)]
    pub grouping: GroupingPolicy,

    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output defaults that CLI flags override
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Disable ANSI styling
    #[serde(default)]
    pub no_color: bool,

    /// List passed audits individually in text output (default: true)
    #[serde(default = "default_show_passed")]
    pub show_passed: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            no_color: false,
            show_passed: default_show_passed(),
        }
    }
}

fn default_show_passed() -> bool {
    true
}

/// Load project configuration from `dir`.
///
/// Searches for configuration files in this order:
/// 1. `lhr-report.toml`
/// 2. `.lhr-reportrc.json`
///
/// Returns default configuration if no config file is found or the file
/// fails to parse.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests;
