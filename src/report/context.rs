//! Explicit render context
//!
//! Everything a single report render needs to know about its surroundings
//! lives here and is passed by reference. Nothing is process-global, so
//! independent renders can run side by side.

use crate::clumps::{Clump, GroupingPolicy};
use crate::config::ProjectConfig;

#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Which clumps are split into group runs
    pub grouping: GroupingPolicy,
    /// Restrict the report to these category ids (all categories when empty)
    pub only_categories: Vec<String>,
    /// Emit ANSI styling in text output
    pub color: bool,
    /// List passed audits individually in text output
    pub show_passed: bool,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            grouping: GroupingPolicy::default(),
            only_categories: Vec::new(),
            color: true,
            show_passed: true,
        }
    }
}

impl RenderContext {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            grouping: config.grouping.clone(),
            only_categories: Vec::new(),
            color: !config.output.no_color,
            show_passed: config.output.show_passed,
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.only_categories = categories;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Replace the set of clumps rendered without group runs
    pub fn with_flat_clumps(mut self, flat_clumps: Vec<Clump>) -> Self {
        self.grouping.flat_clumps = flat_clumps;
        self
    }

    /// Whether `category_id` is selected for rendering
    pub fn includes(&self, category_id: &str) -> bool {
        self.only_categories.is_empty() || self.only_categories.iter().any(|c| c == category_id)
    }
}
