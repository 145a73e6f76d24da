//! Classified report model
//!
//! [`build_report`] turns a run record into the immutable model handed to
//! presentation adapters: for every category its computed score, plugin
//! flag and clump sections, each section split into group runs.
//!
//! Categories are built independently (and in parallel). A category with a
//! dangling audit or group reference is reported in `category_errors` and
//! left out; the remaining categories are unaffected.

mod context;

pub use context::RenderContext;

use crate::clumps::{classify_category, organize, Clump, GroupRun, Grouped};
use crate::error::ReportResult;
use crate::models::{
    AuditRef, AuditResult, ConfigSettings, Environment, Extra, GroupMap, I18n, Lhr, LhrCategory,
    Nullable, ResolvedAudit, RuntimeError, StackPack, Timing,
};
use crate::plugin::is_plugin;
use crate::scoring::{display_score, CategoryScorer, ScoreRating};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Framework-specific advice attached to an audit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackPackNote {
    pub pack_id: String,
    pub title: String,
    #[serde(rename = "iconDataURL")]
    pub icon_data_url: String,
    pub description: String,
}

/// One audit as it appears in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub audit_ref: AuditRef,
    /// The audit result, unmodified
    pub result: AuditResult,
    /// Data-contract problems found while building the report
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contract_warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stack_packs: Vec<StackPackNote>,
}

impl AuditEntry {
    fn new(resolved: ResolvedAudit<'_>, category_id: &str, stack_packs: &[StackPack]) -> Self {
        let mut contract_warnings = Vec::new();
        if let Some(score) = resolved.result.out_of_range_score() {
            warn!(
                "Audit {} in {} has score {} outside [0, 1]",
                resolved.result.id, category_id, score
            );
            contract_warnings.push(format!(
                "Score {} is outside the valid range [0, 1]",
                score
            ));
        }

        let stack_packs = stack_packs
            .iter()
            .filter_map(|pack| {
                pack.descriptions
                    .get(&resolved.audit_ref.id)
                    .map(|description| StackPackNote {
                        pack_id: pack.id.clone(),
                        title: pack.title.clone(),
                        icon_data_url: pack.icon_data_url.clone(),
                        description: description.clone(),
                    })
            })
            .collect();

        Self {
            audit_ref: resolved.audit_ref.clone(),
            result: resolved.result.clone(),
            contract_warnings,
            stack_packs,
        }
    }

    pub fn id(&self) -> &str {
        &self.audit_ref.id
    }
}

impl Grouped for AuditEntry {
    fn group_id(&self) -> Option<&str> {
        self.audit_ref.group_id()
    }
}

/// A non-empty clump and its group runs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClumpSection {
    pub clump: Clump,
    pub count: usize,
    pub runs: Vec<GroupRun<AuditEntry>>,
}

impl ClumpSection {
    /// All entries of this clump in run order
    pub fn entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.runs.iter().flat_map(|run| run.members.iter())
    }
}

/// The classified view of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub manual_description: Nullable<String>,
    /// Weighted score computed from the audits
    pub score: Option<f64>,
    /// Score as recorded in the run record, passed through
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub recorded_score: Nullable<f64>,
    pub display_score: Option<u32>,
    pub rating: ScoreRating,
    pub is_plugin: bool,
    pub audit_count: usize,
    /// Non-empty clumps in presentation order
    pub clumps: Vec<ClumpSection>,
    /// Category fields this crate does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

impl CategoryReport {
    pub fn clump(&self, clump: Clump) -> Option<&ClumpSection> {
        self.clumps.iter().find(|section| section.clump == clump)
    }

    /// Number of audits in `clump` (zero when the clump is absent)
    pub fn clump_len(&self, clump: Clump) -> usize {
        self.clump(clump).map_or(0, |section| section.count)
    }
}

/// A category that could not be built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryError {
    pub category: String,
    pub message: String,
}

/// The full classified report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModel {
    pub requested_url: String,
    pub final_url: String,
    pub fetch_time: String,
    pub lighthouse_version: String,
    pub environment: Environment,
    pub user_agent: String,
    pub run_warnings: Vec<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub runtime_error: Nullable<RuntimeError>,
    pub config_settings: ConfigSettings,
    pub i18n: I18n,
    pub timing: Timing,
    pub stack_packs: Vec<StackPack>,
    pub category_groups: GroupMap,
    pub categories: Vec<CategoryReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_errors: Vec<CategoryError>,
    /// Top-level record fields this crate does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

impl ReportModel {
    pub fn category(&self, id: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn total_audits(&self) -> usize {
        self.categories.iter().map(|c| c.audit_count).sum()
    }

    /// The run-level failure, if the runner reported one
    pub fn runtime_failure(&self) -> Option<&RuntimeError> {
        self.runtime_error.get().filter(|e| e.is_error())
    }
}

/// Build the classified view of a single category
pub fn build_category(
    lhr: &Lhr,
    category: &LhrCategory,
    ctx: &RenderContext,
) -> ReportResult<CategoryReport> {
    category.check_groups(&lhr.category_groups)?;
    let breakdown = CategoryScorer::new(&lhr.audits).calculate(category)?;
    let clumps = classify_category(category, &lhr.audits)?;

    let mut sections = Vec::new();
    for (clump, members) in clumps.iter() {
        if members.is_empty() {
            continue;
        }
        let entries: Vec<AuditEntry> = members
            .iter()
            .map(|m| AuditEntry::new(*m, &category.id, &lhr.stack_packs))
            .collect();
        let runs = organize(&entries, ctx.grouping.is_grouped(clump));
        sections.push(ClumpSection {
            clump,
            count: entries.len(),
            runs,
        });
    }

    debug!(
        "Built category {}: {} audits in {} clumps",
        category.id,
        clumps.total(),
        sections.len()
    );

    Ok(CategoryReport {
        id: category.id.clone(),
        title: category.title.clone(),
        description: category.description.clone(),
        manual_description: category.manual_description.clone(),
        score: breakdown.score,
        recorded_score: category.score.clone(),
        display_score: display_score(breakdown.score),
        rating: ScoreRating::from_score(breakdown.score),
        is_plugin: is_plugin(&category.id),
        audit_count: clumps.total(),
        clumps: sections,
        extra: category.extra.clone(),
    })
}

/// Build the classified report for every selected category
pub fn build_report(lhr: &Lhr, ctx: &RenderContext) -> ReportModel {
    let selected: Vec<&LhrCategory> = lhr
        .categories
        .values()
        .filter(|c| ctx.includes(&c.id))
        .collect();

    let built: Vec<(&LhrCategory, ReportResult<CategoryReport>)> = selected
        .par_iter()
        .map(|category| (*category, build_category(lhr, category, ctx)))
        .collect();

    let mut categories = Vec::with_capacity(built.len());
    let mut category_errors = Vec::new();
    for (category, result) in built {
        match result {
            Ok(report) => categories.push(report),
            Err(e) => {
                warn!("Skipping category {}: {}", category.id, e);
                category_errors.push(CategoryError {
                    category: category.id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    let model = ReportModel {
        requested_url: lhr.requested_url.clone(),
        final_url: lhr.final_url.clone(),
        fetch_time: lhr.fetch_time.clone(),
        lighthouse_version: lhr.lighthouse_version.clone(),
        environment: lhr.environment.clone(),
        user_agent: lhr.user_agent.clone(),
        run_warnings: lhr.run_warnings.clone(),
        runtime_error: lhr.runtime_error.clone(),
        config_settings: lhr.config_settings.clone(),
        i18n: lhr.i18n.clone(),
        timing: lhr.timing.clone(),
        stack_packs: lhr.stack_packs.clone(),
        category_groups: lhr.category_groups.clone(),
        categories,
        category_errors,
        extra: lhr.extra.clone(),
    };

    if let Some(error) = model.runtime_failure() {
        warn!("Run reported {}: {}", error.code, error.message);
    }

    info!(
        "Report built: {} categories, {} audits, {} errors",
        model.categories.len(),
        model.total_audits(),
        model.category_errors.len()
    );

    model
}
