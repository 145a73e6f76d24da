//! JSON reporter
//!
//! Outputs the full ReportModel as pretty-printed JSON.
//! This is the hand-off format for presentation adapters.

use crate::report::ReportModel;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ReportModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
