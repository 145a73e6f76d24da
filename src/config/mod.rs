//! Configuration module for lhr-report
//!
//! This module handles:
//! - Project-level configuration (lhr-report.toml)
//! - Clump grouping policy
//! - CLI output defaults

mod project_config;

pub use project_config::{
    load_project_config,
    OutputConfig,
    ProjectConfig,
    CONFIG_FILE_NAME,
    DEFAULT_CONFIG,
};
